//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - File-backed server address cache (via fcast-core)
//! - Session context shared by the transport and the services
//! - HTTP client implementing the command and host ports (via fcast-http)
//!
//! Command handlers receive the composed `CliContext` and delegate to the
//! orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use fcast_core::ports::{AddressCache, CommandPort, HostPort, HostSession};
use fcast_core::{
    ConfigOrchestrator, FileAddressCache, MetricsService, SERVER_ADDRESS_FILE, ServerAddress,
    ServerAddressStore, SessionConfig, SessionContext,
};
use fcast_http::{ClientConfig, DefaultForecastClient};
use tracing::debug;

use crate::parser::Cli;
use crate::restart::RestartNotice;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Transport settings.
    pub client: ClientConfig,
    /// Session settings.
    pub session: SessionConfig,
    /// Override for the directory holding the cached address.
    pub data_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Build the config from parsed global flags.
    pub fn from_cli(cli: &Cli) -> Self {
        let client = ClientConfig::new()
            .with_host_url(cli.host_url.clone())
            .with_plugin_id(cli.plugin_id.clone())
            .with_host_token(cli.host_token.clone())
            .with_service_token(cli.service_token.clone());

        let session = SessionConfig::new(cli.host_url.clone())
            .with_loopback_resolution(cli.resolve_loopback_tenant);

        Self {
            client,
            session,
            data_dir: cli.data_dir.clone(),
        }
    }

    fn address_cache(&self) -> Result<FileAddressCache> {
        match &self.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Ok(FileAddressCache::new(dir.join(SERVER_ADDRESS_FILE)))
            }
            None => Ok(FileAddressCache::open_default()?),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The session orchestrator.
    pub orchestrator: ConfigOrchestrator,
}

impl CliContext {
    pub const fn orchestrator(&self) -> &ConfigOrchestrator {
        &self.orchestrator
    }

    pub const fn servers(&self) -> &ServerAddressStore {
        self.orchestrator.servers()
    }

    pub const fn metrics(&self) -> &MetricsService {
        self.orchestrator.metrics()
    }

    /// Resolve the forecasting server; unconfigured is an error.
    ///
    /// Every handler that sends an envelope command calls this first.
    pub async fn require_server(&self) -> Result<ServerAddress> {
        Ok(self.servers().require_server().await?)
    }
}

/// Bootstrap the CLI application.
///
/// 1. Opens the address cache under the data root
/// 2. Creates the session context
/// 3. Creates the HTTP client bound to the session
/// 4. Assembles the orchestrator with a terminal restart notice
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let cache: Arc<dyn AddressCache> = Arc::new(config.address_cache()?);
    let session = Arc::new(SessionContext::new(config.session.clone(), cache));

    let client = Arc::new(DefaultForecastClient::new(&config.client, session.clone())?);
    debug!(host_url = %config.client.host_url(), "Forecast client ready");

    Ok(bootstrap_with(
        session,
        client.clone(),
        client,
        Arc::new(RestartNotice),
    ))
}

/// Bootstrap with custom ports (for testing).
pub fn bootstrap_with(
    session: Arc<SessionContext>,
    commands: Arc<dyn CommandPort>,
    host: Arc<dyn HostPort>,
    host_session: Arc<dyn HostSession>,
) -> CliContext {
    CliContext {
        orchestrator: ConfigOrchestrator::new(session, commands, host, host_session),
    }
}
