use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// User interaction coming from the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionEvent {
    YearSelect { year: i32 },
    PointSelect { index: i64 },
}

impl DomainEvent for SelectionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SelectionEvent::YearSelect { .. } => "year-select",
            SelectionEvent::PointSelect { .. } => "point-select",
        }
    }
}

impl SelectionEvent {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_events() {
        assert_eq!(
            SelectionEvent::from_json(r#"{"kind":"year-select","year":2024}"#).unwrap(),
            SelectionEvent::YearSelect { year: 2024 }
        );
        let point = SelectionEvent::from_json(r#"{"kind":"point-select","index":3}"#).unwrap();
        assert_eq!(point, SelectionEvent::PointSelect { index: 3 });
        assert_eq!(point.event_type(), "point-select");
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(SelectionEvent::from_json(r#"{"kind":"zoom","level":2}"#).is_err());
    }
}
