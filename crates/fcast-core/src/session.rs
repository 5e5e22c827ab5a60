//! Session context: tenant identity and server address for one host instance.
//!
//! Owned by the orchestrator and shared with the transport through an `Arc`.
//! Both values are computed lazily and dropped again by [`SessionContext::reset`].

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{DEFAULT_LICENSE_WARNING_DAYS, ServerAddress, TenantId};
use crate::error::ForecastResult;
use crate::ports::AddressCache;

/// Delay between saving a profile and restarting the host session.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_secs(2);

/// Session-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the host instance; its hostname is the tenant.
    pub host_url: String,
    /// Wait before [`HostSession::reload`](crate::ports::HostSession::reload) after a save.
    pub reload_delay: Duration,
    /// Ask the host proxy for the tenant when the host is a loopback address.
    pub resolve_loopback_tenant: bool,
    /// Days-to-expiry below which the license is flagged.
    pub license_warning_days: i64,
}

impl SessionConfig {
    pub fn new(host_url: impl Into<String>) -> Self {
        Self {
            host_url: host_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    #[must_use]
    pub const fn with_loopback_resolution(mut self, enabled: bool) -> Self {
        self.resolve_loopback_tenant = enabled;
        self
    }

    #[must_use]
    pub const fn with_license_warning_days(mut self, days: i64) -> Self {
        self.license_warning_days = days;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host_url: "http://localhost:3000".to_string(),
            reload_delay: DEFAULT_RELOAD_DELAY,
            resolve_loopback_tenant: false,
            license_warning_days: DEFAULT_LICENSE_WARNING_DAYS,
        }
    }
}

/// What the session knows about its forecasting server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerState {
    /// Admin config not read yet; the local cache is consulted.
    Unknown,
    /// Admin config says there is no server.
    Unconfigured,
    /// Admin config supplied this address.
    Configured(ServerAddress),
}

impl ServerState {
    /// Whether admin config has confirmed an address.
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

/// Lazily initialized per-session state.
pub struct SessionContext {
    config: SessionConfig,
    cache: Arc<dyn AddressCache>,
    tenant: RwLock<Option<TenantId>>,
    server: RwLock<ServerState>,
}

impl SessionContext {
    pub fn new(config: SessionConfig, cache: Arc<dyn AddressCache>) -> Self {
        Self {
            config,
            cache,
            tenant: RwLock::new(None),
            server: RwLock::new(ServerState::Unknown),
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The tenant for this session.
    ///
    /// Computed synchronously from the host URL on first use and cached until
    /// [`reset`](Self::reset). Never touches the network.
    pub fn tenant(&self) -> TenantId {
        if let Some(tenant) = self
            .tenant
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return tenant.clone();
        }

        let mut slot = self.tenant.write().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| {
            let tenant = TenantId::from_host_url(&self.config.host_url);
            debug!(tenant = %tenant, "Resolved tenant from host URL");
            tenant
        })
        .clone()
    }

    /// Replace the cached tenant, e.g. with a remotely resolved one.
    pub fn set_tenant(&self, tenant: TenantId) {
        *self.tenant.write().unwrap_or_else(PoisonError::into_inner) = Some(tenant);
    }

    pub fn server_state(&self) -> ServerState {
        self.server
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The address commands are sent to, if any.
    ///
    /// Admin config is authoritative once read. Before that the local cache is
    /// used; a cache read failure counts as no address. Mutating commands need
    /// a [`Configured`](ServerState::Configured) state, see
    /// [`mutation_address`](Self::mutation_address).
    pub fn server_address(&self) -> Option<ServerAddress> {
        match self.server_state() {
            ServerState::Configured(address) => Some(address),
            ServerState::Unconfigured => None,
            ServerState::Unknown => match self.cache.load() {
                Ok(cached) => cached.as_deref().and_then(ServerAddress::parse),
                Err(e) => {
                    warn!(error = %e, "Failed to read cached server address");
                    None
                }
            },
        }
    }

    /// The address for a state-changing command.
    ///
    /// Only an admin-confirmed address qualifies; the cache never does.
    pub fn mutation_address(&self) -> Option<ServerAddress> {
        match self.server_state() {
            ServerState::Configured(address) => Some(address),
            ServerState::Unknown | ServerState::Unconfigured => None,
        }
    }

    /// Record an admin-supplied address and persist it locally.
    ///
    /// The in-memory state is updated even if persisting fails.
    pub fn mark_configured(&self, address: ServerAddress) -> ForecastResult<()> {
        let persisted = self.cache.store(address.as_str());
        *self.server.write().unwrap_or_else(PoisonError::into_inner) =
            ServerState::Configured(address);
        persisted
    }

    /// Record that no server is configured and drop the cached address.
    pub fn mark_unconfigured(&self) {
        *self.server.write().unwrap_or_else(PoisonError::into_inner) = ServerState::Unconfigured;
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "Failed to clear cached server address");
        }
    }

    /// Persist an address chosen locally without admin config.
    ///
    /// Takes effect only while the admin config is unknown; an admin-supplied
    /// address always wins.
    pub fn remember_address(&self, address: &ServerAddress) -> ForecastResult<()> {
        self.cache.store(address.as_str())
    }

    /// Forget the tenant and the server state. The local cache is kept.
    pub fn reset(&self) {
        *self.tenant.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.server.write().unwrap_or_else(PoisonError::into_inner) = ServerState::Unknown;
        debug!("Session context reset");
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("config", &self.config)
            .field("server", &self.server_state())
            .finish_non_exhaustive()
    }
}
