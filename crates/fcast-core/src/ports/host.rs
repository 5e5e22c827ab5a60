//! Host dashboard API port.

use async_trait::async_trait;
use serde_json::Value;

use crate::commands::Command;
use crate::domain::DataSourceOption;
use crate::error::ForecastResult;

/// Port for the host application's own API.
///
/// These calls go to the dashboard host, never to the forecasting server, and
/// are therefore not gated on the server address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostPort: Send + Sync {
    /// Read the admin-provided `forecasting_server` setting, verbatim.
    ///
    /// The sentinel `"none"` and the empty string both mean unconfigured;
    /// interpreting them is left to the caller.
    async fn forecasting_server(&self) -> ForecastResult<String>;

    /// List the host's data sources.
    async fn data_sources(&self) -> ForecastResult<Vec<DataSourceOption>>;

    /// Send a command to the plugin's backend service through the host proxy.
    ///
    /// Returns the raw response data; there is no envelope on this path.
    async fn backend_service(&self, command: &Command) -> ForecastResult<Value>;
}
