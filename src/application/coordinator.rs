use std::sync::Arc;

use super::view::{ChartView, empty_message};
use crate::domain::{
    chart::{ClearScheduler, PriceHistoryChart, TooltipController, TooltipState, axis_ticks},
    config::ChartConfig,
    errors::ChartResult,
    events::{DomainEvent, SelectionEvent},
    logging::LogComponent,
    market_data::PriceObservation,
};
use crate::{log_debug, log_error, log_info};

/// Application service wiring the chart aggregate to the tooltip and the view.
///
/// Every event is applied synchronously; the next `view()` reflects it.
pub struct PriceHistoryCoordinator {
    chart: PriceHistoryChart,
    tooltip: TooltipController,
    config: ChartConfig,
}

impl PriceHistoryCoordinator {
    pub fn new(config: ChartConfig, scheduler: Box<dyn ClearScheduler>) -> Self {
        log_info!(
            LogComponent::Application("Coordinator"),
            "Creating price history coordinator (tooltip {} ms)",
            config.tooltip_delay_ms
        );
        Self {
            chart: PriceHistoryChart::new(),
            tooltip: TooltipController::new(scheduler, config.tooltip_delay_ms),
            config,
        }
    }

    pub fn set_observations(&mut self, observations: Vec<PriceObservation>) {
        self.replace_observations(Arc::new(observations));
    }

    pub fn replace_observations(&mut self, observations: Arc<Vec<PriceObservation>>) {
        self.chart.replace_observations(observations);
        let parsed = self.chart.parsed();
        log_info!(
            LogComponent::Application("Coordinator"),
            "Loaded {} observation(s), {} year(s), revision {}",
            parsed.len(),
            self.chart.years().len(),
            self.chart.revision()
        );
    }

    /// Replace the input from a JSON array of `{dateValue, priceValue}`.
    pub fn set_observations_json(&mut self, json: &str) -> ChartResult<()> {
        let observations: Vec<PriceObservation> = serde_json::from_str(json)?;
        self.set_observations(observations);
        Ok(())
    }

    pub fn select_year(&mut self, year: i32) -> ChartResult<()> {
        self.chart.select_year(year)
    }

    pub fn select_point(&mut self, index: i64) -> ChartResult<TooltipState> {
        self.tooltip.select(self.chart.series(), index)
    }

    pub fn dispatch(&mut self, event: SelectionEvent) -> ChartResult<()> {
        log_debug!(
            LogComponent::Application("Coordinator"),
            "Dispatching {}",
            event.event_type()
        );
        match event {
            SelectionEvent::YearSelect { year } => self.select_year(year),
            SelectionEvent::PointSelect { index } => self.select_point(index).map(|_| ()),
        }
    }

    /// Register a callback for tooltip auto-clears.
    pub fn on_tooltip_expire(&mut self, callback: impl Fn() + 'static) {
        self.tooltip.on_expire(callback);
    }

    pub fn view(&self) -> ChartView {
        let series = self.chart.series().clone();
        let ticks = axis_ticks(&series, self.config.axis_segments, &self.config.currency_prefix)
            .unwrap_or_else(|err| {
                log_error!(LogComponent::Application("Coordinator"), "Axis ticks failed: {}", err);
                Vec::new()
            });
        let empty = series
            .is_empty()
            .then(|| empty_message(&self.config.empty_message_prefix, self.chart.selected_year()));

        ChartView {
            years: self.chart.years().years().to_vec(),
            selected_year: self.chart.selected_year(),
            series,
            tooltip: self.tooltip.state(),
            axis_ticks: ticks,
            empty_message: empty,
        }
    }

    pub fn chart(&self) -> &PriceHistoryChart {
        &self.chart
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}
