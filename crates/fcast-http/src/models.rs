//! Internal wire types for the host API.
//!
//! External consumers see only the domain types from `fcast-core`.

use fcast_core::DataSourceOption;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Internal configuration resolved from [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Host base URL, always ending in `/`
    pub host_url: Url,
    pub plugin_id: String,
    pub host_token: Option<String>,
    pub service_token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    /// Maximum number of retry attempts for host GETs (default: 3)
    pub max_retries: u8,
    /// Base delay in milliseconds for exponential backoff (default: 500)
    pub retry_base_delay_ms: u64,
}

/// `GET api/plugins/<id>/resources/config`
#[derive(Debug, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub forecasting_server: Option<String>,
}

/// One entry of `GET api/datasources`.
#[derive(Debug, Deserialize)]
pub struct HostDataSource {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl From<HostDataSource> for DataSourceOption {
    fn from(source: HostDataSource) -> Self {
        Self::named(source.name, source.kind)
    }
}
