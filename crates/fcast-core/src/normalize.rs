//! Auth profile normalization.
//!
//! The server returns profile fields either as scalars or as mappings keyed by
//! row index. Each field goes through [`FieldValue::extract`](crate::payload::FieldValue::extract),
//! and the result is either a fully resolved [`AuthProfile`] or the canonical
//! empty one.

use serde_json::Value;
use tracing::debug;

use crate::domain::{AuthProfile, AuthType};
use crate::payload::{RawConfigPayload, decode_results};

/// Normalize a raw `get_grafana_*_config` payload.
pub fn normalize(payload: &Value) -> AuthProfile {
    let payload = decode_results(payload.clone());
    let raw = RawConfigPayload::from_value(&payload);

    let url = RawConfigPayload::field(raw.url.as_ref());
    if url.is_empty() {
        debug!("No usable url in config payload, using empty profile");
        return AuthProfile::empty();
    }

    let auth_type = match RawConfigPayload::field(raw.auth_type.as_ref()) {
        wire if wire.is_empty() => AuthType::Bearer,
        wire => AuthType::from_wire(&wire),
    };

    AuthProfile::resolved(
        url,
        RawConfigPayload::field(raw.token.as_ref()),
        auth_type,
        RawConfigPayload::field(raw.username.as_ref()),
        RawConfigPayload::field(raw.password.as_ref()),
    )
}
