use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::application::{ChartView, PriceHistoryCoordinator};
use crate::domain::{config::ChartConfig, events::SelectionEvent, market_data::PriceObservation};
use crate::infrastructure::GlooClearScheduler;

const PLOT_WIDTH: f64 = 340.0;
const PLOT_HEIGHT: f64 = 250.0;
const PLOT_PADDING: f64 = 24.0;

/// SVG coordinates of each series point, left to right.
///
/// The y-scale runs from zero to the top axis tick, matching the axis labels.
pub fn plot_positions(view: &ChartView, width: f64, height: f64, padding: f64) -> Vec<(f64, f64)> {
    let count = view.series.len();
    let top = view
        .axis_ticks
        .last()
        .map(|tick| tick.value)
        .filter(|v| *v > 0.0)
        .unwrap_or(1.0);
    let step = if count > 1 { (width - 2.0 * padding) / (count - 1) as f64 } else { 0.0 };

    view.series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = if count > 1 { padding + step * i as f64 } else { width / 2.0 };
            let y = height - padding - (point.value / top) * (height - 2.0 * padding);
            (x, y)
        })
        .collect()
}

/// 📈 Price history line chart with year filter and auto-hiding tooltip
#[component]
pub fn PriceHistoryChart(
    #[prop(into)] observations: Signal<Vec<PriceObservation>>,
    #[prop(optional)] config: Option<ChartConfig>,
) -> impl IntoView {
    let coordinator = Rc::new(RefCell::new(PriceHistoryCoordinator::new(
        config.unwrap_or_default(),
        Box::new(GlooClearScheduler::new()),
    )));
    let chart_view = create_rw_signal(coordinator.borrow().view());

    coordinator
        .borrow_mut()
        .on_tooltip_expire(move || chart_view.update(|v| v.tooltip = None));

    {
        let coordinator = Rc::clone(&coordinator);
        create_effect(move |_| {
            let data = observations.get();
            let mut coordinator = coordinator.borrow_mut();
            coordinator.set_observations(data);
            chart_view.set(coordinator.view());
        });
    }

    let dispatch = {
        let coordinator = Rc::clone(&coordinator);
        move |event: SelectionEvent| {
            let mut coordinator = coordinator.borrow_mut();
            if coordinator.dispatch(event).is_ok() {
                chart_view.set(coordinator.view());
            }
        }
    };

    let on_year = dispatch.clone();
    let on_point = dispatch;

    view! {
        <div class="price-history">
            <h3 class="price-history__title">"Price History"</h3>

            <div class="price-history__filter">
                <span>"Select Year:"</span>
                <select on:change=move |ev| {
                    if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                        on_year(SelectionEvent::YearSelect { year });
                    }
                }>
                    {move || chart_view.with(|v| {
                        v.years
                            .iter()
                            .map(|&year| {
                                let selected = v.selected_year == Some(year);
                                view! { <option value=year.to_string() selected=selected>{year}</option> }
                            })
                            .collect_view()
                    })}
                </select>
            </div>

            {move || {
                let v = chart_view.get();
                match v.empty_message.clone() {
                    Some(message) => view! { <p class="price-history__empty">{message}</p> }.into_view(),
                    None => render_plot(&v, on_point.clone()).into_view(),
                }
            }}
        </div>
    }
}

fn render_plot(v: &ChartView, on_point: impl Fn(SelectionEvent) + Clone + 'static) -> impl IntoView {
    let positions = plot_positions(v, PLOT_WIDTH, PLOT_HEIGHT, PLOT_PADDING);
    let line = positions
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");

    let ticks = v
        .axis_ticks
        .iter()
        .enumerate()
        .map(|(i, tick)| {
            let segments = v.axis_ticks.len().saturating_sub(1).max(1) as f64;
            let y = PLOT_HEIGHT - PLOT_PADDING - (i as f64 / segments) * (PLOT_HEIGHT - 2.0 * PLOT_PADDING);
            view! { <text x="2" y=format!("{y:.1}") class="price-history__tick">{tick.label.clone()}</text> }
        })
        .collect_view();

    let dots = positions
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| {
            let on_point = on_point.clone();
            view! {
                <circle
                    cx=format!("{x:.1}")
                    cy=format!("{y:.1}")
                    r="5"
                    class="price-history__dot"
                    on:click=move |_| on_point(SelectionEvent::PointSelect { index: i as i64 })
                />
            }
        })
        .collect_view();

    let tooltip = v.tooltip.clone().map(|t| {
        view! { <div class="price-history__tooltip">{t.text}</div> }
    });

    view! {
        <div class="price-history__plot">
            <svg viewBox=format!("0 0 {PLOT_WIDTH} {PLOT_HEIGHT}") width=PLOT_WIDTH.to_string() height=PLOT_HEIGHT.to_string()>
                {ticks}
                <polyline points=line fill="none" stroke="#228be6" stroke-width="2"/>
                {dots}
            </svg>
            {tooltip}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ManualClock;

    fn view_for(raw: Vec<PriceObservation>) -> ChartView {
        let clock = ManualClock::new();
        let mut coordinator = PriceHistoryCoordinator::new(ChartConfig::default(), Box::new(clock.scheduler()));
        coordinator.set_observations(raw);
        coordinator.view()
    }

    #[test]
    fn positions_span_the_plot_and_scale_to_top_tick() {
        let v = view_for(vec![
            PriceObservation::new("2024-01-01", "0"),
            PriceObservation::new("2024-06-01", "400000"),
        ]);
        let positions = plot_positions(&v, 100.0, 100.0, 10.0);
        assert_eq!(positions, vec![(10.0, 90.0), (90.0, 10.0)]);
    }

    #[test]
    fn single_point_is_centered() {
        let v = view_for(vec![PriceObservation::new("2024-01-01", "5")]);
        let positions = plot_positions(&v, 100.0, 100.0, 10.0);
        assert_eq!(positions[0].0, 50.0);
    }
}
