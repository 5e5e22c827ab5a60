//! HTTP backend abstraction.
//!
//! The production implementation uses reqwest with a cookie store and retries
//! host GETs on transient errors. POSTs are never retried.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{HttpError, HttpResult};
use crate::models::HttpConfig;

/// Who a request is addressed to. Only the host receives the host token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Host,
    Forecasting,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Host => "host",
            Self::Forecasting => "forecasting",
        })
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON.
///
/// This is an implementation detail - external code uses the core port traits.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// `GET` a host URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T>;

    /// `POST` a JSON body and return the JSON response.
    async fn post_json(&self, target: Target, url: &Url, body: &Value) -> HttpResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    host_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HttpConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
            host_token: config.host_token.clone(),
        })
    }

    /// Attach the host token to requests addressed to the host.
    fn authorize(&self, request: reqwest::RequestBuilder, target: Target) -> reqwest::RequestBuilder {
        match (&self.host_token, target) {
            (Some(token), Target::Host) => request.bearer_auth(token),
            _ => request,
        }
    }

    /// GET a host URL with automatic retry for transient errors.
    async fn get_with_retry(&self, url: &Url) -> HttpResult<reqwest::Response> {
        let mut last_error: Option<HttpError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                debug!(url = %url, attempt, ?delay, "Retrying host request");
                tokio::time::sleep(delay).await;
            }

            let request = self.authorize(self.client.get(url.as_str()), Target::Host);
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(HttpError::status(status.as_u16(), url.as_str()));
                        continue;
                    }

                    return Err(HttpError::status(status.as_u16(), url.as_str()));
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HttpError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

/// Read a response body as JSON.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> HttpResult<T> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
        let response = self.get_with_retry(url).await?;
        read_json(response).await
    }

    async fn post_json(&self, target: Target, url: &Url, body: &Value) -> HttpResult<Value> {
        let request = self.authorize(self.client.post(url.as_str()).json(body), target);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::status(status.as_u16(), url.as_str()));
        }
        read_json(response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
