//! Lenient date parsing for dataset fields.
//!
//! Dataset dates come from CSV exports and arrive in several shapes. Anything
//! that cannot be read as a date, including the `Data Unknown` sentinel, is
//! treated as undated rather than an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Placeholder the export pipeline writes for missing text values.
pub const DATA_UNKNOWN: &str = "Data Unknown";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a JSON value as a timestamp.
///
/// Strings are tried against RFC 3339 and the common export formats; integers
/// are epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => parse_date_str(text),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// Parse a date string. Returns `None` for empty input and the sentinel.
pub fn parse_date_str(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() || text == DATA_UNKNOWN {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// First parseable date among `fields`, in order.
pub fn first_date(entry: &serde_json::Map<String, Value>, fields: &[&str]) -> Option<NaiveDateTime> {
    fields
        .iter()
        .filter_map(|field| entry.get(*field))
        .find_map(parse_date)
}

/// Format a date value as `YYYY-MM-DD`.
pub fn format_day(value: &Value) -> Option<String> {
    parse_date(value).map(|dt| dt.format("%Y-%m-%d").to_string())
}
