pub use super::value_objects::{ObservationDate, Price, RawValue};
use serde::{Deserialize, Serialize};

/// One dated price point as delivered by the price-history API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub date_value: RawValue,
    pub price_value: RawValue,
}

impl PriceObservation {
    pub fn new(date_value: impl Into<RawValue>, price_value: impl Into<RawValue>) -> Self {
        Self { date_value: date_value.into(), price_value: price_value.into() }
    }
}

/// Observation with a usable date.
///
/// `price` is `None` when the raw price was malformed: the record still counts
/// towards the year index but never reaches a rendered series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedObservation {
    pub input_index: usize,
    pub date: ObservationDate,
    pub price: Option<Price>,
}

impl ParsedObservation {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Result of parsing a whole input collection.
#[derive(Debug, Clone, Default)]
pub struct ParsedObservations {
    pub observations: Vec<ParsedObservation>,
    /// Records dropped because their date did not parse.
    pub rejected_dates: usize,
    /// Records kept for the index but excluded from series because of their price.
    pub rejected_prices: usize,
}

impl ParsedObservations {
    pub fn len(&self) -> usize {
        self.observations.len()
    }
}
