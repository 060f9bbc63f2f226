use std::sync::Arc;

use super::services::{build_series, build_year_index, resolve_selected_year};
use super::value_objects::{RenderableSeries, YearIndex};
use crate::domain::{
    errors::{ChartResult, SelectionError},
    logging::LogComponent,
    market_data::{ParsedObservations, PriceObservation, parse_observations},
};
use crate::{log_info, log_warn};

/// Domain entity - price history chart state.
///
/// Owns everything derived from one observation collection. Each mutation
/// recomputes what depends on it before returning, so callers never see a
/// series built from an older input or selection.
#[derive(Debug, Clone, Default)]
pub struct PriceHistoryChart {
    raw: Arc<Vec<PriceObservation>>,
    parsed: ParsedObservations,
    years: YearIndex,
    selected_year: Option<i32>,
    series: RenderableSeries,
    revision: u64,
}

impl PriceHistoryChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observations(observations: Vec<PriceObservation>) -> Self {
        let mut chart = Self::new();
        chart.replace_observations(Arc::new(observations));
        chart
    }

    /// Swap in a new input collection.
    ///
    /// A user-selected year survives if it is still present; otherwise the
    /// earliest year is selected.
    pub fn replace_observations(&mut self, observations: Arc<Vec<PriceObservation>>) {
        self.parsed = parse_observations(&observations);
        self.raw = observations;
        self.revision += 1;

        let years = build_year_index(&self.parsed.observations);
        let selected = resolve_selected_year(&years, self.selected_year);
        if selected != self.selected_year {
            log_info!(
                LogComponent::Domain("Chart"),
                "Selected year {:?} -> {:?}",
                self.selected_year,
                selected
            );
        }
        self.years = years;
        self.selected_year = selected;
        self.recompute_series();
    }

    /// Select a year from the index; unknown years leave state unchanged.
    pub fn select_year(&mut self, year: i32) -> ChartResult<()> {
        if !self.years.contains(year) {
            let err = SelectionError::UnknownYear(year);
            log_warn!(LogComponent::Domain("Chart"), "Ignoring selection: {}", err);
            return Err(err.into());
        }
        if self.selected_year != Some(year) {
            self.selected_year = Some(year);
            self.recompute_series();
        }
        Ok(())
    }

    fn recompute_series(&mut self) {
        self.series = build_series(&self.parsed.observations, self.selected_year);
    }

    pub fn observations(&self) -> &Arc<Vec<PriceObservation>> {
        &self.raw
    }

    pub fn parsed(&self) -> &ParsedObservations {
        &self.parsed
    }

    pub fn years(&self) -> &YearIndex {
        &self.years
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.selected_year
    }

    pub fn series(&self) -> &RenderableSeries {
        &self.series
    }

    /// Incremented on every input replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ChartError;

    fn obs(date: &str, price: &str) -> PriceObservation {
        PriceObservation::new(date, price)
    }

    #[test]
    fn empty_input_has_no_selection() {
        let chart = PriceHistoryChart::with_observations(vec![]);
        assert!(chart.years().is_empty());
        assert_eq!(chart.selected_year(), None);
        assert!(chart.series().is_empty());
    }

    #[test]
    fn user_selection_survives_replacement() {
        let mut chart = PriceHistoryChart::with_observations(vec![obs("2022-01-01", "1"), obs("2023-01-01", "2")]);
        chart.select_year(2023).unwrap();
        chart.replace_observations(Arc::new(vec![obs("2021-05-05", "3"), obs("2023-02-02", "4")]));
        assert_eq!(chart.selected_year(), Some(2023));
        assert_eq!(chart.series().values(), vec![4.0]);
        assert_eq!(chart.revision(), 2);
    }

    #[test]
    fn vanished_selection_falls_back_to_earliest() {
        let mut chart = PriceHistoryChart::with_observations(vec![obs("2022-01-01", "1"), obs("2023-01-01", "2")]);
        chart.select_year(2023).unwrap();
        chart.replace_observations(Arc::new(vec![obs("2025-01-01", "5"), obs("2024-01-01", "6")]));
        assert_eq!(chart.selected_year(), Some(2024));
    }

    #[test]
    fn unknown_year_is_rejected_without_change() {
        let mut chart = PriceHistoryChart::with_observations(vec![obs("2022-01-01", "1")]);
        let err = chart.select_year(1999).unwrap_err();
        assert_eq!(err, ChartError::InvalidSelection(SelectionError::UnknownYear(1999)));
        assert_eq!(chart.selected_year(), Some(2022));
        assert_eq!(chart.series().len(), 1);
    }

    #[test]
    fn index_keeps_years_whose_prices_are_all_bad() {
        let chart = PriceHistoryChart::with_observations(vec![obs("2020-01-01", "n/a"), obs("2021-01-01", "9")]);
        assert_eq!(chart.years().years(), &[2020, 2021]);
        assert_eq!(chart.selected_year(), Some(2020));
        assert!(chart.series().is_empty());
    }
}
