//! Server endpoint and tenant identity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Value the host reports when no forecasting server has been configured.
pub const UNCONFIGURED_SENTINEL: &str = "none";

/// A configured forecasting server address.
///
/// Never empty and never the [`UNCONFIGURED_SENTINEL`]; use [`ServerAddress::parse`]
/// to build one from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerAddress(String);

impl ServerAddress {
    /// Parse a raw address, returning `None` for the "unconfigured" values.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNCONFIGURED_SENTINEL {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The address as it was configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URL commands are posted to.
    ///
    /// Trailing slashes are dropped and `http://` is assumed when the address
    /// carries no scheme.
    pub fn endpoint(&self) -> String {
        let trimmed = self.0.trim_end_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier separating one host instance's data from another's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Wrap an already-resolved tenant string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The empty sentinel returned when best-effort resolution fails.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Derive the tenant from the host instance's address (its hostname).
    ///
    /// Pure and synchronous: never touches the network.
    pub fn from_host_url(host_url: &str) -> Self {
        let trimmed = host_url.trim();
        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        Url::parse(&candidate)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .map_or_else(|| Self(trimmed.to_string()), Self)
    }

    /// Whether resolution produced nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the tenant names a loopback host, where the synchronous value
    /// does not identify the instance.
    pub fn is_loopback(&self) -> bool {
        matches!(self.0.as_str(), "localhost" | "::1" | "[::1]") || self.0.starts_with("127.")
    }

    /// The tenant as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
