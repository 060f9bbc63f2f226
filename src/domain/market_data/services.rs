use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::domain::{
    errors::ChartError,
    logging::LogComponent,
    market_data::{ObservationDate, ParsedObservation, ParsedObservations, Price, PriceObservation, RawValue},
};
use crate::log_warn;

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Minute precision with a numeric offset; RFC 3339 covers the rest.
const OFFSET_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parse a raw date.
///
/// Accepted shapes, all resolved to UTC:
/// - four-digit string: January 1 of that year
/// - other integer (number or string): milliseconds since the Unix epoch
/// - RFC 3339 date-time with offset, or minute precision with `Z`/`+hh:mm`
/// - ISO date-time without offset, read as UTC
/// - ISO calendar date or year-month, read as midnight UTC on the first day
pub fn parse_date(raw: &RawValue) -> Result<ObservationDate, String> {
    match raw {
        RawValue::Number(number) => {
            let millis = match number.as_i64() {
                Some(millis) => millis,
                None => number
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
                    .ok_or_else(|| format!("unsupported epoch value {number}"))?,
            };
            from_epoch_millis(millis)
        }
        RawValue::Text(text) => parse_date_text(text.trim()),
    }
}

fn parse_date_text(text: &str) -> Result<ObservationDate, String> {
    if text.is_empty() {
        return Err("empty date".to_string());
    }

    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .and_then(start_of_day)
            .ok_or_else(|| format!("unsupported year {text:?}"));
    }

    if let Ok(millis) = text.parse::<i64>() {
        return from_epoch_millis(millis);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Ok(ObservationDate::new(date_time.with_timezone(&Utc)));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(date_time) = DateTime::parse_from_str(text, format) {
            return Ok(ObservationDate::new(date_time.with_timezone(&Utc)));
        }
    }

    // a trailing `Z` is UTC, the same as no offset
    let naive_text = text.strip_suffix(['Z', 'z']).unwrap_or(text);
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_text, format) {
            return Ok(ObservationDate::new(Utc.from_utc_datetime(&naive)));
        }
    }

    let calendar_date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
        (text.len() == 7)
            .then(|| NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok())
            .flatten()
    });
    calendar_date
        .and_then(start_of_day)
        .ok_or_else(|| format!("unparseable date {text:?}"))
}

fn start_of_day(date: NaiveDate) -> Option<ObservationDate> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| ObservationDate::new(Utc.from_utc_datetime(&naive)))
}

fn from_epoch_millis(millis: i64) -> Result<ObservationDate, String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(ObservationDate::new)
        .ok_or_else(|| format!("epoch millis {millis} out of range"))
}

/// Parse a raw price into a finite, non-negative magnitude.
pub fn parse_price(raw: &RawValue) -> Result<Price, String> {
    let value = match raw {
        RawValue::Number(number) => number
            .as_f64()
            .ok_or_else(|| format!("unsupported price {number}"))?,
        RawValue::Text(text) => {
            let text = text.trim();
            text.parse::<f64>()
                .map_err(|_| format!("unparseable price {text:?}"))?
        }
    };

    if !value.is_finite() {
        return Err(format!("non-finite price {value}"));
    }
    if value < 0.0 {
        return Err(format!("negative price {value}"));
    }
    Ok(Price::from(value))
}

/// Parse one record; only an unusable date rejects the whole record.
pub fn parse_observation(index: usize, observation: &PriceObservation) -> Result<ParsedObservation, ChartError> {
    let date = parse_date(&observation.date_value)
        .map_err(|reason| ChartError::MalformedObservation { index, reason })?;
    let price = match parse_price(&observation.price_value) {
        Ok(price) => Some(price),
        Err(reason) => {
            log_warn!(
                LogComponent::Domain("Observations"),
                "{}",
                ChartError::MalformedObservation { index, reason }
            );
            None
        }
    };
    Ok(ParsedObservation { input_index: index, date, price })
}

/// Parse a whole collection, dropping malformed records instead of failing.
pub fn parse_observations(raw: &[PriceObservation]) -> ParsedObservations {
    let mut parsed = ParsedObservations {
        observations: Vec::with_capacity(raw.len()),
        ..Default::default()
    };

    for (index, observation) in raw.iter().enumerate() {
        match parse_observation(index, observation) {
            Ok(observation) => {
                if observation.price.is_none() {
                    parsed.rejected_prices += 1;
                }
                parsed.observations.push(observation);
            }
            Err(err) => {
                log_warn!(LogComponent::Domain("Observations"), "{}", err);
                parsed.rejected_dates += 1;
            }
        }
    }

    if parsed.rejected_dates + parsed.rejected_prices > 0 {
        log_warn!(
            LogComponent::Domain("Observations"),
            "Dropped {} record(s) with bad dates and {} with bad prices out of {}",
            parsed.rejected_dates,
            parsed.rejected_prices,
            raw.len()
        );
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(date: ObservationDate) -> (i32, u32, u32) {
        (date.year(), date.month0() + 1, date.day())
    }

    #[test]
    fn calendar_date_is_midnight_utc() {
        let date = parse_date(&RawValue::from("2024-01-10")).unwrap();
        assert_eq!(ymd(date), (2024, 1, 10));
        assert_eq!(date.timestamp_millis() % 86_400_000, 0);
    }

    #[test]
    fn offset_date_time_is_converted_to_utc() {
        let date = parse_date(&RawValue::from("2024-01-01T02:00:00+05:30")).unwrap();
        assert_eq!(ymd(date), (2023, 12, 31));
    }

    #[test]
    fn naive_date_time_is_read_as_utc() {
        let date = parse_date(&RawValue::from("2023-06-01T10:15:00.250")).unwrap();
        assert_eq!(ymd(date), (2023, 6, 1));
    }

    #[test]
    fn epoch_millis_from_number_and_string() {
        let from_number = parse_date(&RawValue::from(1_704_844_800_000_i64)).unwrap();
        let from_text = parse_date(&RawValue::from("1704844800000")).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(ymd(from_number), (2024, 1, 10));
    }

    #[test]
    fn year_month_is_the_first_of_the_month() {
        let date = parse_date(&RawValue::from("2024-03")).unwrap();
        assert_eq!(ymd(date), (2024, 3, 1));
        assert!(parse_date(&RawValue::from("2024-13")).is_err());
    }

    #[test]
    fn minute_precision_with_zone() {
        let zulu = parse_date(&RawValue::from("2024-01-10T08:00Z")).unwrap();
        assert_eq!(ymd(zulu), (2024, 1, 10));
        assert_eq!(zulu.timestamp_millis() % 86_400_000, 8 * 3_600_000);

        let offset = parse_date(&RawValue::from("2024-01-10T08:00+05:30")).unwrap();
        assert_eq!(offset.timestamp_millis() % 86_400_000, 2 * 3_600_000 + 30 * 60_000);

        let early = parse_date(&RawValue::from("2024-01-01T02:00+05:30")).unwrap();
        assert_eq!(ymd(early), (2023, 12, 31));
    }

    #[test]
    fn four_digit_string_is_a_year_not_epoch_millis() {
        let date = parse_date(&RawValue::from("2024")).unwrap();
        assert_eq!(ymd(date), (2024, 1, 1));
        assert_eq!(date.timestamp_millis() % 86_400_000, 0);

        // a JSON number stays on the epoch path
        let number = parse_date(&RawValue::from(2024_i64)).unwrap();
        assert_eq!(ymd(number), (1970, 1, 1));
    }

    #[test]
    fn garbage_date_is_rejected() {
        assert!(parse_date(&RawValue::from("not a date")).is_err());
        assert!(parse_date(&RawValue::from("")).is_err());
        assert!(parse_date(&RawValue::from("2024-13-40")).is_err());
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_price(&RawValue::from("1200000")).unwrap().value(), 1_200_000.0);
        assert_eq!(parse_price(&RawValue::from(" 42.5 ")).unwrap().value(), 42.5);
        assert_eq!(parse_price(&RawValue::from(0.0)).unwrap().value(), 0.0);
    }

    #[test]
    fn price_rejects_negative_non_finite_and_garbage() {
        assert!(parse_price(&RawValue::from("-1")).is_err());
        assert!(parse_price(&RawValue::from("NaN")).is_err());
        assert!(parse_price(&RawValue::from(f64::INFINITY)).is_err());
        assert!(parse_price(&RawValue::from("12abc")).is_err());
    }

    #[test]
    fn collection_parsing_counts_rejections() {
        let raw = vec![
            PriceObservation::new("2024-01-10", "100"),
            PriceObservation::new("yesterday", "100"),
            PriceObservation::new("2024-02-10", "lots"),
        ];
        let parsed = parse_observations(&raw);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.rejected_dates, 1);
        assert_eq!(parsed.rejected_prices, 1);
        assert_eq!(parsed.observations[1].input_index, 2);
        assert!(parsed.observations[1].price.is_none());
    }
}
