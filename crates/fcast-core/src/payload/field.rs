//! Scalar-or-indexed field decoding.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Map, Value};

use super::{ordered_values, scalar_string};

/// A field that the server sends either as a bare string or as a mapping
/// keyed by row index (an artifact of row-oriented serialization upstream).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A bare string.
    Scalar(String),
    /// A mapping such as `{"0": "value"}`.
    Indexed(Map<String, Value>),
    /// Anything else; extracts as empty.
    Unsupported(IgnoredAny),
}

impl FieldValue {
    /// Apply the single extraction rule.
    ///
    /// Scalars are returned as-is. Mappings prefer key `"0"`, then the first
    /// value in row order, then the empty string; empty values are skipped.
    pub fn extract(&self) -> String {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Indexed(map) => map
                .get("0")
                .and_then(non_empty)
                .or_else(|| ordered_values(map).first().copied().and_then(non_empty))
                .unwrap_or_default(),
            Self::Unsupported(_) => String::new(),
        }
    }
}

fn non_empty(value: &Value) -> Option<String> {
    scalar_string(value).filter(|s| !s.is_empty())
}

/// Raw configuration payload as returned by `get_grafana_*_config`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawConfigPayload {
    pub url: Option<FieldValue>,
    pub token: Option<FieldValue>,
    pub auth_type: Option<FieldValue>,
    pub username: Option<FieldValue>,
    pub password: Option<FieldValue>,
}

impl RawConfigPayload {
    /// Decode from a results value; non-objects decode as an empty payload.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Extract a field, empty when absent.
    pub fn field(field: Option<&FieldValue>) -> String {
        field.map(FieldValue::extract).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> FieldValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_scalar() {
        assert_eq!(decode(json!("http://g")).extract(), "http://g");
    }

    #[test]
    fn test_indexed_prefers_zero() {
        assert_eq!(decode(json!({"1": "b", "0": "a"})).extract(), "a");
    }

    #[test]
    fn test_indexed_falls_back_to_first_value() {
        assert_eq!(decode(json!({"3": "c", "1": "b"})).extract(), "b");
        assert_eq!(decode(json!({"0": "", "1": "b"})).extract(), "");
        assert_eq!(decode(json!({"0": null, "5": "x"})).extract(), "");
        assert_eq!(decode(json!({"row": "x"})).extract(), "x");
    }

    #[test]
    fn test_unsupported_shapes_extract_empty() {
        assert_eq!(decode(json!(42)).extract(), "");
        assert_eq!(decode(json!(["a"])).extract(), "");
        assert_eq!(decode(json!({})).extract(), "");
    }

    #[test]
    fn test_payload_tolerates_odd_fields() {
        let payload = RawConfigPayload::from_value(&json!({
            "url": {"0": "http://g"},
            "token": 17,
            "extra": true
        }));
        assert_eq!(RawConfigPayload::field(payload.url.as_ref()), "http://g");
        assert_eq!(RawConfigPayload::field(payload.token.as_ref()), "");
        assert!(payload.username.is_none());
    }

    #[test]
    fn test_payload_from_non_object() {
        assert_eq!(RawConfigPayload::from_value(&json!("ok")), RawConfigPayload::default());
    }
}
