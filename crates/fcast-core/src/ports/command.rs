//! Forecasting server command port.

use async_trait::async_trait;
use serde_json::Value;

use crate::commands::Command;
use crate::domain::ServerAddress;
use crate::error::ForecastResult;

/// Port for sending commands through the response envelope.
///
/// # Contract
///
/// - `send` stamps the session tenant onto the body, posts it to the session's
///   server address and returns the unwrapped `results`.
/// - With no configured address `send` fails with
///   [`ForecastError::Unconfigured`](crate::ForecastError::Unconfigured) and
///   nothing is dispatched.
/// - A non-2xx response or network failure is a `Transport` error; an envelope
///   whose `status` is not `"success"` is a `Business` error carrying `results`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandPort: Send + Sync {
    /// Send a command to the session's forecasting server.
    async fn send(&self, command: &Command) -> ForecastResult<Value>;

    /// Send a bare `connection` probe to an explicit address.
    ///
    /// This is the only call allowed while the session is unconfigured. A
    /// non-success envelope is a `Business` error, as with `send`.
    async fn probe(&self, address: &ServerAddress) -> ForecastResult<Value>;
}
