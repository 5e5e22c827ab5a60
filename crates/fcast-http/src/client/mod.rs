//! Forecasting client: envelope commands plus host API calls.

mod envelope;
mod host;

use fcast_core::{ForecastResult, SessionContext};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::HttpConfig;
use crate::port::map_error;
use crate::url::host_base;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default forecasting client using the reqwest HTTP backend.
pub type DefaultForecastClient = ForecastClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the forecasting server and the host API.
///
/// Generic over an HTTP backend for testing. Use `DefaultForecastClient` in
/// production and talk to it through `CommandPort` and `HostPort`.
pub struct ForecastClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: HttpConfig,
    pub(crate) session: Arc<SessionContext>,
}

impl DefaultForecastClient {
    /// Create a new client bound to `session`.
    pub fn new(config: &ClientConfig, session: Arc<SessionContext>) -> ForecastResult<Self> {
        let internal_config = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(&internal_config).map_err(map_error)?;
        Ok(Self {
            backend,
            config: internal_config,
            session,
        })
    }

    fn to_internal_config(config: &ClientConfig) -> ForecastResult<HttpConfig> {
        Ok(HttpConfig {
            host_url: host_base(&config.host_url).map_err(map_error)?,
            plugin_id: config.plugin_id.clone(),
            host_token: config.host_token.clone(),
            service_token: config.service_token.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
        })
    }
}

impl<B: HttpBackend> ForecastClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(
        config: HttpConfig,
        backend: B,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            backend,
            config,
            session,
        }
    }
}
