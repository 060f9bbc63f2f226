use chrono::{DateTime, Datelike, Utc};
use derive_more::{Constructor, From};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Value Object - raw scalar from the price-history payload.
///
/// The backend sends dates and prices either as JSON numbers or as strings,
/// so both shapes are accepted and interpreted later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for RawValue {
    /// Non-finite floats have no JSON form and become `"NaN"`/`"inf"` text,
    /// which the price parser then rejects.
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

/// Value Object - validated price magnitude (finite, non-negative)
#[derive(Debug, Clone, Copy, PartialEq, From, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - point in time of one observation, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Constructor, Serialize, Deserialize)]
pub struct ObservationDate(DateTime<Utc>);

impl ObservationDate {
    pub fn value(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month (January is 0).
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}
