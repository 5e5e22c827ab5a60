//! Decoding helpers for loosely shaped server payloads.
//!
//! The forecasting server serializes tables row-wise or column-wise depending
//! on the command, and individual fields may arrive as scalars or as mappings
//! keyed by row index. Everything in here is total: malformed input degrades
//! to `None` or an empty result instead of an error.

mod columns;
mod field;
mod results;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

pub use columns::{ColumnTable, column_values};
pub use field::{FieldValue, RawConfigPayload};
pub use results::decode_results;

/// Coerce a scalar JSON value to a string.
///
/// Strings pass through; numbers and booleans are rendered. Null, arrays and
/// objects yield `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a scalar JSON value to a float. Numeric strings are parsed.
pub fn scalar_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Parse a timestamp in any of the shapes the server emits.
///
/// Accepts epoch milliseconds (number or numeric string), RFC 3339, and naive
/// `YYYY-MM-DD[ HH:MM[:SS]]` forms, which are taken as UTC. Fractional epoch
/// values are truncated to whole milliseconds.
#[allow(clippy::cast_possible_truncation)] // Epoch millis fit in i64
pub fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::String(s) => parse_time_str(s.trim()),
        _ => None,
    }
}

fn parse_time_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ms) = s.parse::<i64>() {
        return Utc.timestamp_millis_opt(ms).single();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Values of a mapping in row order.
///
/// Keys that are array indices come first in ascending numeric order, followed
/// by the remaining keys in map order, so `{"10": .., "2": ..}` yields row 2
/// before row 10.
pub fn ordered_values(map: &Map<String, Value>) -> Vec<&Value> {
    let mut indexed: Vec<(u32, &Value)> = Vec::new();
    let mut named: Vec<&Value> = Vec::new();

    for (key, value) in map {
        match index_key(key) {
            Some(index) => indexed.push((index, value)),
            None => named.push(value),
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed
        .into_iter()
        .map(|(_, value)| value)
        .chain(named)
        .collect()
}

fn index_key(key: &str) -> Option<u32> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok()
}
