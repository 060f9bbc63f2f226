use serde::{Deserialize, Serialize};

use crate::domain::chart::{AxisTick, RenderableSeries, TooltipState};

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub series: RenderableSeries,
    pub tooltip: Option<TooltipState>,
    pub axis_ticks: Vec<AxisTick>,
    /// Set instead of a plot when the selected year has no points.
    pub empty_message: Option<String>,
}

impl ChartView {
    pub fn has_plot(&self) -> bool {
        !self.series.is_empty()
    }
}

/// `"No Data Available for 2024"`
pub fn empty_message(prefix: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{prefix} {year}"),
        None => prefix.to_string(),
    }
}
