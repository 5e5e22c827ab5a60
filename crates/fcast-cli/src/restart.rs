//! Host session restart for a terminal.
//!
//! There is no page to reload, so the CLI tells the operator instead.

use async_trait::async_trait;
use fcast_core::{ForecastResult, HostSession};
use tracing::info;

/// `HostSession` that prints a restart notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestartNotice;

#[async_trait]
impl HostSession for RestartNotice {
    async fn reload(&self) -> ForecastResult<()> {
        info!("Host session restart requested");
        println!("Settings applied. Reload the dashboard so the plugin picks them up.");
        Ok(())
    }
}
