use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;

use price_history_wasm::application::PriceHistoryCoordinator;
use price_history_wasm::domain::chart::ManualClock;
use price_history_wasm::domain::config::ChartConfig;
use price_history_wasm::domain::errors::{ChartError, SelectionError};
use price_history_wasm::domain::events::SelectionEvent;
use price_history_wasm::domain::logging::{LogLevel, MemoryLogger, init_logger};
use price_history_wasm::domain::market_data::PriceObservation;

fn memory_logger() -> &'static MemoryLogger {
    static LOGGER: OnceLock<&'static MemoryLogger> = OnceLock::new();
    LOGGER.get_or_init(|| {
        let logger: &'static MemoryLogger = Box::leak(Box::new(MemoryLogger::new()));
        init_logger(Box::new(logger));
        logger
    })
}

fn coordinator(clock: &ManualClock) -> PriceHistoryCoordinator {
    let mut coordinator = PriceHistoryCoordinator::new(ChartConfig::default(), Box::new(clock.scheduler()));
    coordinator.set_observations(vec![
        PriceObservation::new("2024-01-10", "1200000"),
        PriceObservation::new("2024-03-05", "15000000"),
        PriceObservation::new("2023-06-01", "50000"),
    ]);
    coordinator
}

#[test]
fn tooltip_clears_two_seconds_after_selection() {
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);

    chart.dispatch(SelectionEvent::PointSelect { index: 0 }).unwrap();
    let tooltip = chart.view().tooltip.unwrap();
    assert_eq!(tooltip.text, "Jun 1: 50,000");

    clock.advance(1_999);
    assert!(chart.view().tooltip.is_some());
    clock.advance(1);
    assert!(chart.view().tooltip.is_none());
}

#[test]
fn rapid_reselection_keeps_the_newest_tooltip() {
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);
    chart.select_year(2024).unwrap();

    chart.select_point(0).unwrap();
    clock.advance(1_000);
    chart.select_point(1).unwrap();
    clock.advance(1_500);

    // the first timer would have fired at 2000 ms
    assert_eq!(chart.view().tooltip.unwrap().text, "Mar 5: 1.50Cr");
    clock.advance(500);
    assert!(chart.view().tooltip.is_none());
    assert_eq!(clock.fired(), 1);
}

#[test]
fn tooltip_survives_a_year_change() {
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);

    chart.select_point(0).unwrap();
    chart.dispatch(SelectionEvent::YearSelect { year: 2024 }).unwrap();
    assert_eq!(chart.view().tooltip.unwrap().label, "Jun 1");

    clock.advance(2_000);
    assert!(chart.view().tooltip.is_none());
}

#[test]
fn expire_callback_fires_once_per_clear() {
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    chart.on_tooltip_expire(move || counter.set(counter.get() + 1));

    chart.select_point(0).unwrap();
    clock.advance(2_000);
    clock.advance(10_000);
    assert_eq!(hits.get(), 1);
}

#[test]
fn invalid_selections_are_rejected_and_logged() {
    let logger = memory_logger();
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);

    let err = chart.dispatch(SelectionEvent::YearSelect { year: 1990 }).unwrap_err();
    assert_eq!(err, ChartError::InvalidSelection(SelectionError::UnknownYear(1990)));
    assert_eq!(chart.view().selected_year, Some(2023));

    let err = chart.select_point(7).unwrap_err();
    assert_eq!(
        err,
        ChartError::InvalidSelection(SelectionError::PointOutOfRange { index: 7, len: 1 })
    );
    assert!(chart.view().tooltip.is_none());
    assert!(!clock.has_pending());

    let warnings = logger.messages_at_least(LogLevel::Warn);
    assert!(warnings.iter().any(|m| m.contains("1990")));
}

#[test]
fn dropping_the_coordinator_cancels_the_timer() {
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);
    chart.select_point(0).unwrap();
    assert!(clock.has_pending());

    drop(chart);
    assert!(!clock.has_pending());
    clock.advance(5_000);
    assert_eq!(clock.fired(), 0);
}

#[test]
fn view_snapshot_after_selection() {
    let clock = ManualClock::new();
    let mut chart = coordinator(&clock);
    chart.select_year(2024).unwrap();
    chart.select_point(1).unwrap();

    let view = chart.view();
    let summary = serde_json::json!({
        "emptyMessage": view.empty_message,
        "labels": view.series.labels(),
        "selectedYear": view.selected_year,
        "tickCount": view.axis_ticks.len(),
        "tooltip": view.tooltip.map(|t| t.text),
        "years": view.years,
    });

    insta::assert_json_snapshot!(summary, @r###"
    {
      "emptyMessage": null,
      "labels": [
        "Jan 10",
        "Mar 5"
      ],
      "selectedYear": 2024,
      "tickCount": 5,
      "tooltip": "Mar 5: 1.50Cr",
      "years": [
        2023,
        2024
      ]
    }
    "###);
}
