//! Host session restart port.

use async_trait::async_trait;

use crate::error::ForecastResult;

/// Restarts the host session so it picks up new plugin settings.
///
/// In a browser this is a page reload; elsewhere it is whatever forces the
/// host to re-read its configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostSession: Send + Sync {
    async fn reload(&self) -> ForecastResult<()>;
}
