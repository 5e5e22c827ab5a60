//! Port trait implementations for `ForecastClient`.
//!
//! Internal `HttpError`s are mapped to `ForecastError` here and nowhere else.

use async_trait::async_trait;
use fcast_core::{
    Command, CommandPort, DataSourceOption, ForecastError, ForecastResult, HostPort, ServerAddress,
};
use serde_json::Value;

use crate::client::ForecastClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpError` to core `ForecastError`.
pub(crate) fn map_error(err: HttpError) -> ForecastError {
    match err {
        HttpError::ApiRequestFailed {
            status,
            status_text,
            ..
        } => {
            if status_text.is_empty() {
                ForecastError::transport(format!("HTTP {status}"))
            } else {
                ForecastError::transport(status_text)
            }
        }
        HttpError::Network(e) => ForecastError::transport(e.to_string()),
        HttpError::InvalidUrl(e) => ForecastError::transport(format!("Invalid URL: {e}")),
        HttpError::JsonParse(e) => ForecastError::invalid_response(e.to_string()),
        HttpError::InvalidResponse { message } => ForecastError::invalid_response(message),
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> CommandPort for ForecastClient<B> {
    async fn send(&self, command: &Command) -> ForecastResult<Value> {
        self.send_command(command).await
    }

    async fn probe(&self, address: &ServerAddress) -> ForecastResult<Value> {
        self.probe_address(address).await
    }
}

#[async_trait]
impl<B: HttpBackend> HostPort for ForecastClient<B> {
    async fn forecasting_server(&self) -> ForecastResult<String> {
        self.admin_forecasting_server().await
    }

    async fn data_sources(&self) -> ForecastResult<Vec<DataSourceOption>> {
        self.list_data_sources().await
    }

    async fn backend_service(&self, command: &Command) -> ForecastResult<Value> {
        self.call_backend_service(command).await
    }
}
