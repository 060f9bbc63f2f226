use crate::domain::{
    chart::{AxisTick, MonthAbbrev, RenderablePoint, RenderableSeries, YearIndex},
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{ObservationDate, ParsedObservation},
};
use crate::{log_debug, log_error};

pub const LAKH: f64 = 100_000.0;
pub const CRORE: f64 = 10_000_000.0;

/// Distinct years of all observations with a usable date.
pub fn build_year_index(observations: &[ParsedObservation]) -> YearIndex {
    YearIndex::from_years(observations.iter().map(ParsedObservation::year))
}

/// Keep the current year if it is still indexed, otherwise fall back to the earliest one.
pub fn resolve_selected_year(index: &YearIndex, current: Option<i32>) -> Option<i32> {
    match current {
        Some(year) if index.contains(year) => Some(year),
        _ => index.earliest(),
    }
}

/// `"Jan 25"`: abbreviated month and unpadded day.
pub fn point_label(date: &ObservationDate) -> String {
    format!("{} {}", MonthAbbrev::from_month0(date.month0()).as_ref(), date.day())
}

/// Filter to `selected_year`, sort by date and label.
///
/// The sort is stable, so observations sharing a timestamp keep their input
/// order. Records without a valid price are skipped.
pub fn build_series(observations: &[ParsedObservation], selected_year: Option<i32>) -> RenderableSeries {
    let Some(year) = selected_year else {
        return RenderableSeries::default();
    };

    let mut in_year: Vec<&ParsedObservation> = observations
        .iter()
        .filter(|o| o.year() == year && o.price.is_some())
        .collect();
    in_year.sort_by_key(|o| o.date);

    let points: Vec<RenderablePoint> = in_year
        .into_iter()
        .filter_map(|o| {
            o.price.map(|price| RenderablePoint {
                label: point_label(&o.date),
                value: price.value(),
                source_date: o.date.value(),
            })
        })
        .collect();

    log_debug!(
        LogComponent::Domain("Series"),
        "Built {} point(s) for {}",
        points.len(),
        year
    );
    RenderableSeries::new(points)
}

/// Compact Indian currency magnitude: `Cr` above a crore, `L` above a lakh,
/// grouped digits below.
pub fn format_price(value: f64) -> ChartResult<String> {
    if !value.is_finite() || value < 0.0 {
        log_error!(
            LogComponent::Domain("Formatter"),
            "format_price called with {}",
            value
        );
        return Err(ChartError::FormatterDomain(value));
    }

    if value >= CRORE {
        Ok(format!("{}Cr", fixed_two(value / CRORE)))
    } else if value >= LAKH {
        Ok(format!("{}L", fixed_two(value / LAKH)))
    } else {
        Ok(group_digits(value))
    }
}

/// Fraction digits that spell out any `f64 >= 1` exactly (its lowest bit is at least 2^-52).
const EXACT_FRACTION_DIGITS: usize = 52;

/// Two decimals from the exact binary value, ties rounded up.
///
/// `{:.2}` rounds exact ties to even, so `1.125` would become `1.12`.
fn fixed_two(scaled: f64) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, scaled);
    let (integer, fraction) = round_half_up(&exact, 2);
    format!("{integer}.{fraction}")
}

/// At most two decimals with trailing zeros dropped, `en-IN` grouping.
///
/// Rounds the shortest round-trip decimal, ties up.
fn group_digits(value: f64) -> String {
    // -0.0 passes the domain check
    let shortest = (value + 0.0).to_string();
    let (integer, fraction) = round_half_up(&shortest, 2);
    let fraction = fraction.trim_end_matches('0');
    let grouped = group_indian(&integer);
    if fraction.is_empty() {
        grouped
    } else {
        format!("{grouped}.{fraction}")
    }
}

/// Round a plain non-negative decimal string to `places` fraction digits,
/// half away from zero. Returns the integer and fraction digits.
fn round_half_up(decimal: &str, places: usize) -> (String, String) {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));
    let mut fraction: Vec<u8> = fraction.bytes().collect();
    fraction.resize(fraction.len().max(places + 1), b'0');
    let round_up = fraction[places] >= b'5';

    let mut digits: Vec<u8> = integer.bytes().chain(fraction[..places].iter().copied()).collect();
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    (
        String::from_utf8_lossy(&digits[..split]).into_owned(),
        String::from_utf8_lossy(&digits[split..]).into_owned(),
    )
}

/// `1234567` -> `12,34,567`: the last three digits, then pairs.
fn group_indian(integer: &str) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }
    let (head, tail) = integer.split_at(integer.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Evenly spaced y-axis ticks from zero to the series maximum.
pub fn axis_ticks(series: &RenderableSeries, segments: usize, prefix: &str) -> ChartResult<Vec<AxisTick>> {
    let max = series.max_value().unwrap_or(0.0);
    let values: Vec<f64> = if segments == 0 || max <= 0.0 {
        vec![0.0]
    } else {
        (0..=segments)
            .map(|i| max * i as f64 / segments as f64)
            .collect()
    };

    values
        .into_iter()
        .map(|value| {
            Ok(AxisTick {
                value,
                label: format!("{prefix}{}", format_price(value)?),
            })
        })
        .collect()
}
