use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{AsRefStr, EnumIter, FromRepr};

use crate::domain::market_data::ObservationDate;

/// Value Object - fixed English month abbreviations, independent of locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, FromRepr)]
#[repr(u8)]
pub enum MonthAbbrev {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthAbbrev {
    /// `0` is January.
    pub fn from_month0(month0: u32) -> Self {
        Self::from_repr((month0 % 12) as u8).unwrap_or(Self::Jan)
    }
}

/// Value Object - distinct years present in the observations, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearIndex(Vec<i32>);

impl YearIndex {
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Self {
        let set: BTreeSet<i32> = years.into_iter().collect();
        Self(set.into_iter().collect())
    }

    pub fn years(&self) -> &[i32] {
        &self.0
    }

    pub fn contains(&self, year: i32) -> bool {
        self.0.binary_search(&year).is_ok()
    }

    /// Earliest year, the default selection.
    pub fn earliest(&self) -> Option<i32> {
        self.0.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// One plottable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderablePoint {
    /// `"{Mon} {day}"`, e.g. `"Jan 25"`
    pub label: String,
    pub value: f64,
    pub source_date: DateTime<Utc>,
}

impl RenderablePoint {
    pub fn date(&self) -> ObservationDate {
        ObservationDate::new(self.source_date)
    }
}

/// Points of the selected year, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderableSeries(Vec<RenderablePoint>);

impl RenderableSeries {
    pub fn new(points: Vec<RenderablePoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[RenderablePoint] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&RenderablePoint> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.value).collect()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.0.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// Labelled y-axis tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// Tooltip shown for a selected point until it expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipState {
    pub label: String,
    pub formatted_value: String,
    /// `"Jan 10: 12.00L"`
    pub text: String,
    pub expires_after_ms: u32,
}

impl TooltipState {
    pub fn new(label: String, formatted_value: String, expires_after_ms: u32) -> Self {
        let text = format!("{label}: {formatted_value}");
        Self { label, formatted_value, text, expires_after_ms }
    }
}
