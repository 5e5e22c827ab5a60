//! Response envelope shared by every forecasting command.
//!
//! ```text
//! request:  {...command fields, "command": "<name>", "tenant": "<tenant>"}
//! response: {"status": "success" | <other>, "results": <payload | string>}
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ForecastError, ForecastResult};
use crate::payload::{decode_results, scalar_string};

/// Status value marking an accepted command.
pub const SUCCESS_STATUS: &str = "success";

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub results: Value,
}

impl ResponseEnvelope {
    /// Decode a response body. Anything other than a JSON object is invalid.
    pub fn from_value(body: Value) -> ForecastResult<Self> {
        if !body.is_object() {
            return Err(ForecastError::invalid_response(format!(
                "expected an envelope object, got {}",
                kind_of(&body)
            )));
        }
        serde_json::from_value(body).map_err(|e| ForecastError::invalid_response(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        self.status.as_str() == Some(SUCCESS_STATUS)
    }

    /// The `results` payload, or a business error carrying it as the reason.
    ///
    /// String-encoded JSON results are re-parsed on success.
    pub fn into_results(self) -> ForecastResult<Value> {
        if self.is_success() {
            return Ok(decode_results(self.results));
        }

        let reason = scalar_string(&self.results).unwrap_or_else(|| self.results.to_string());
        Err(ForecastError::business(reason))
    }
}

/// Decode a response body and unwrap its results in one step.
pub fn unwrap_envelope(body: Value) -> ForecastResult<Value> {
    ResponseEnvelope::from_value(body)?.into_results()
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_returns_results() {
        let results = unwrap_envelope(json!({"status": "success", "results": "ok"})).unwrap();
        assert_eq!(results, json!("ok"));
    }

    #[test]
    fn test_success_reparses_string_results() {
        let results = unwrap_envelope(json!({
            "status": "success",
            "results": "{\"url\": {\"0\": \"http://prom\"}}"
        }))
        .unwrap();
        assert_eq!(results["url"]["0"], "http://prom");
    }

    #[test]
    fn test_non_success_is_business_error() {
        let err = unwrap_envelope(json!({"status": "fail", "results": "duplicate name"})).unwrap_err();
        assert_eq!(err, ForecastError::business("duplicate name"));
    }

    #[test]
    fn test_missing_status_is_business_error() {
        let err = unwrap_envelope(json!({"results": "no status"})).unwrap_err();
        assert!(err.is_business());
        assert_eq!(err.to_string(), "no status");
    }

    #[test]
    fn test_structured_rejection_is_rendered() {
        let err = unwrap_envelope(json!({"status": "error", "results": {"code": 7}})).unwrap_err();
        assert_eq!(err.to_string(), "{\"code\":7}");
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        let err = unwrap_envelope(json!(["success"])).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidResponse { .. }));
        assert!(!err.is_business());
    }
}
