//! Public configuration for the forecasting client.
//!
//! The internal config is derived from this.

use std::time::Duration;

/// Plugin id used when none is configured.
pub const DEFAULT_PLUGIN_ID: &str = "skylineintelligence-forecasting-app";

/// Configuration for the forecasting client.
///
/// # Example
///
/// ```
/// use fcast_http::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_host_url("https://grafana.example.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the host dashboard
    pub(crate) host_url: String,
    /// Plugin id used in host API paths
    pub(crate) plugin_id: String,
    /// Bearer token for the host API
    pub(crate) host_token: Option<String>,
    /// Token sent with plugin-proxy commands
    pub(crate) service_token: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for host GETs
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_url: "http://localhost:3000".to_string(),
            plugin_id: DEFAULT_PLUGIN_ID.to_string(),
            host_token: None,
            service_token: None,
            user_agent: concat!("fcast-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host_url", &self.host_url)
            .field("plugin_id", &self.plugin_id)
            .field("host_token", &self.host_token.as_ref().map(|_| "***"))
            .field("service_token", &self.service_token.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host dashboard base URL.
    ///
    /// Defaults to `http://localhost:3000`.
    #[must_use]
    pub fn with_host_url(mut self, url: impl Into<String>) -> Self {
        self.host_url = url.into();
        self
    }

    /// Set the plugin id used in host API paths.
    #[must_use]
    pub fn with_plugin_id(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_id = plugin_id.into();
        self
    }

    /// Set an optional bearer token for the host API.
    #[must_use]
    pub fn with_host_token(mut self, token: Option<String>) -> Self {
        self.host_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Set an optional token for plugin-proxy commands.
    #[must_use]
    pub fn with_service_token(mut self, token: Option<String>) -> Self {
        self.service_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for host GETs.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new();
        assert_eq!(config.host_url, "http://localhost:3000");
        assert_eq!(config.plugin_id, DEFAULT_PLUGIN_ID);
        assert!(config.user_agent.contains("fcast-http"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.host_token.is_none());
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::new()
            .with_host_url("https://grafana.example.com")
            .with_plugin_id("custom-app")
            .with_host_token(Some("glsa_host".to_string()))
            .with_service_token(Some("svc".to_string()))
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(0);

        assert_eq!(config.host_url(), "https://grafana.example.com");
        assert_eq!(config.plugin_id, "custom-app");
        assert_eq!(config.host_token.as_deref(), Some("glsa_host"));
        assert_eq!(config.service_token.as_deref(), Some("svc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_empty_tokens_are_unset() {
        let config = ClientConfig::new()
            .with_host_token(Some(String::new()))
            .with_service_token(None);
        assert!(config.host_token.is_none());
        assert!(config.service_token.is_none());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = ClientConfig::new().with_host_token(Some("glsa_secret".to_string()));
        assert!(!format!("{config:?}").contains("glsa_secret"));
    }
}
