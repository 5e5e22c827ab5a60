//! Envelope `results` normalization.

use serde_json::Value;

/// Re-parse `results` that arrived JSON-encoded inside a string.
///
/// Only strings holding a JSON object or array are re-parsed; plain strings
/// such as `"ok"` or a rejection reason are returned unchanged.
pub fn decode_results(results: Value) -> Value {
    let Value::String(text) = &results else {
        return results;
    };

    match serde_json::from_str::<Value>(text.trim()) {
        Ok(parsed @ (Value::Object(_) | Value::Array(_))) => parsed,
        _ => results,
    }
}
