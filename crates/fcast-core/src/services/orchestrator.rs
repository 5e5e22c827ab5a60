//! Session orchestration: startup fetches, profile saves and apply-and-restart.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    AuthProfile, DataSourceOption, LicenseState, Metric, ProfileDraft, ProfileKind, TenantId,
    preferred_data_source,
};
use crate::error::{ForecastError, ForecastResult};
use crate::normalize::normalize;
use crate::ports::{CommandPort, HostPort, HostSession};
use crate::session::SessionContext;

use super::metrics::MetricsService;
use super::server_store::{ServerAddressStore, ServerResolution};
use super::tenant::TenantResolver;

/// Outcome of one independent startup task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "lowercase")]
pub enum Settled<T> {
    Ready(T),
    Failed(#[serde(serialize_with = "serialize_error")] ForecastError),
    /// Not attempted because the server is unconfigured.
    Skipped,
}

fn serialize_error<S: serde::Serializer>(
    error: &ForecastError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.user_message())
}

impl<T> Settled<T> {
    /// Record a task result, logging a failure.
    pub fn from_result(task: &'static str, result: ForecastResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                warn!(task, error = %e, "Startup task failed");
                Self::Failed(e)
            }
        }
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed(_) | Self::Skipped => None,
        }
    }

    pub const fn error(&self) -> Option<&ForecastError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Ready(_) | Self::Skipped => None,
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Everything the presentation layer needs after session start.
///
/// Exposed only once every task has settled; each field succeeded or failed
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub tenant: TenantId,
    pub server: ServerResolution,
    pub license: Settled<LicenseState>,
    pub query_profile: Settled<AuthProfile>,
    pub write_profile: Settled<AuthProfile>,
    pub metrics: Settled<Vec<Metric>>,
    pub data_sources: Settled<Vec<DataSourceOption>>,
    /// Days-to-expiry threshold used for [`license_expires_soon`](Self::license_expires_soon)
    #[serde(skip)]
    license_warning_days: i64,
}

impl SessionSnapshot {
    /// Mutating actions are allowed only with a configured server.
    pub const fn allows_mutations(&self) -> bool {
        self.server.is_configured()
    }

    pub fn license_expires_soon(&self) -> bool {
        self.license
            .ready()
            .is_some_and(|license| license.expires_soon(self.license_warning_days))
    }

    /// Default data source for new metrics.
    pub fn preferred_data_source(&self) -> Option<&DataSourceOption> {
        self.data_sources
            .ready()
            .and_then(|sources| preferred_data_source(sources))
    }

    /// Failed tasks by name.
    pub fn failures(&self) -> Vec<(&'static str, &ForecastError)> {
        [
            ("license", self.license.error()),
            ("query_profile", self.query_profile.error()),
            ("write_profile", self.write_profile.error()),
            ("metrics", self.metrics.error()),
            ("data_sources", self.data_sources.error()),
        ]
        .into_iter()
        .filter_map(|(task, error)| error.map(|e| (task, e)))
        .collect()
    }
}

/// Composes the session services for the presentation layer.
#[derive(Clone)]
pub struct ConfigOrchestrator {
    session: Arc<SessionContext>,
    commands: Arc<dyn CommandPort>,
    host: Arc<dyn HostPort>,
    host_session: Arc<dyn HostSession>,
    tenants: TenantResolver,
    servers: ServerAddressStore,
    metrics: MetricsService,
}

impl ConfigOrchestrator {
    pub fn new(
        session: Arc<SessionContext>,
        commands: Arc<dyn CommandPort>,
        host: Arc<dyn HostPort>,
        host_session: Arc<dyn HostSession>,
    ) -> Self {
        Self {
            tenants: TenantResolver::new(session.clone(), host.clone()),
            servers: ServerAddressStore::new(session.clone(), host.clone(), commands.clone()),
            metrics: MetricsService::new(commands.clone()),
            session,
            commands,
            host,
            host_session,
        }
    }

    pub const fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub const fn tenants(&self) -> &TenantResolver {
        &self.tenants
    }

    pub const fn servers(&self) -> &ServerAddressStore {
        &self.servers
    }

    pub const fn metrics(&self) -> &MetricsService {
        &self.metrics
    }

    /// Resolve tenant and server, then run the startup fetches concurrently.
    ///
    /// With no configured server nothing else is attempted.
    pub async fn start_session(&self) -> SessionSnapshot {
        let tenant = self.tenants.resolve_effective().await;
        let server = self.servers.configured_server().await;
        let license_warning_days = self.session.config().license_warning_days;

        if !server.is_configured() {
            warn!(tenant = %tenant, "No forecasting server configured, mutating actions disabled");
            return SessionSnapshot {
                tenant,
                server,
                license: Settled::Skipped,
                query_profile: Settled::Skipped,
                write_profile: Settled::Skipped,
                metrics: Settled::Skipped,
                data_sources: Settled::Skipped,
                license_warning_days,
            };
        }

        let (license, query_profile, write_profile, metrics, data_sources) = tokio::join!(
            self.metrics.fetch_license(),
            self.fetch_profile(ProfileKind::Query),
            self.fetch_profile(ProfileKind::Write),
            self.metrics.list(),
            self.data_sources(),
        );

        let snapshot = SessionSnapshot {
            tenant,
            server,
            license: Settled::from_result("license", license),
            query_profile: Settled::from_result("query_profile", query_profile),
            write_profile: Settled::from_result("write_profile", write_profile),
            metrics: Settled::from_result("metrics", metrics),
            data_sources: Settled::from_result("data_sources", data_sources),
            license_warning_days,
        };
        info!(
            tenant = %snapshot.tenant,
            failures = snapshot.failures().len(),
            "Session started"
        );
        snapshot
    }

    /// Read and normalize one auth profile.
    pub async fn fetch_profile(&self, kind: ProfileKind) -> ForecastResult<AuthProfile> {
        let results = self.commands.send(&kind.read_command()).await?;
        Ok(normalize(&results))
    }

    /// Validate and save one auth profile. Does not restart the session.
    pub async fn save_profile(&self, kind: ProfileKind, draft: ProfileDraft) -> ForecastResult<()> {
        let command = draft.into_command(kind)?;
        self.commands.send(&command).await?;
        info!(profile = %kind, "Auth profile saved");
        Ok(())
    }

    /// Wait for the reload delay, then restart the host session.
    pub async fn apply_and_restart(&self) -> ForecastResult<()> {
        let delay = self.session.config().reload_delay;
        info!(?delay, "Restarting host session");
        tokio::time::sleep(delay).await;
        self.host_session.reload().await
    }

    /// Save a profile and, only if that succeeded, apply and restart.
    pub async fn save_profile_and_apply(
        &self,
        kind: ProfileKind,
        draft: ProfileDraft,
    ) -> ForecastResult<()> {
        self.save_profile(kind, draft).await?;
        self.apply_and_restart().await
    }

    /// Replace the license and read it back.
    pub async fn update_license(&self, license: &str) -> ForecastResult<LicenseState> {
        self.metrics.update_license(license).await?;
        self.metrics.fetch_license().await
    }

    pub async fn data_sources(&self) -> ForecastResult<Vec<DataSourceOption>> {
        self.host.data_sources().await
    }
}
