use serde::{Deserialize, Serialize};

/// Display settings for the price history chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// How long a tooltip stays visible after a point is selected.
    pub tooltip_delay_ms: u32,
    /// Number of horizontal y-axis segments; the axis gets one more tick than this.
    pub axis_segments: usize,
    pub currency_prefix: String,
    pub empty_message_prefix: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            tooltip_delay_ms: 2_000,
            axis_segments: 4,
            currency_prefix: "₹".to_string(),
            empty_message_prefix: "No Data Available for".to_string(),
        }
    }
}

impl ChartConfig {
    /// Parse a partial JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
