//! Tenant resolution.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::commands::Command;
use crate::domain::TenantId;
use crate::payload::scalar_string;
use crate::ports::HostPort;
use crate::session::SessionContext;

/// Resolves the tenant identifier for the current host instance.
#[derive(Clone)]
pub struct TenantResolver {
    session: Arc<SessionContext>,
    host: Arc<dyn HostPort>,
}

impl TenantResolver {
    pub fn new(session: Arc<SessionContext>, host: Arc<dyn HostPort>) -> Self {
        Self { session, host }
    }

    /// The cached tenant, computed from the host URL on first use.
    pub fn resolve(&self) -> TenantId {
        self.session.tenant()
    }

    /// Ask the host proxy for the caller's remote address.
    ///
    /// Best effort: any failure yields an empty string.
    pub async fn resolve_remote(&self) -> String {
        match self.host.backend_service(&Command::RemoteAddress).await {
            Ok(value) => {
                let address = scalar_string(&value)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default();
                if address.is_empty() {
                    warn!("Remote address lookup returned nothing");
                }
                address
            }
            Err(e) => {
                warn!(error = %e, "Remote address lookup failed");
                String::new()
            }
        }
    }

    /// The tenant to use for this session.
    ///
    /// When loopback resolution is enabled and the host is a loopback address,
    /// a non-empty remote answer replaces the cached tenant.
    pub async fn resolve_effective(&self) -> TenantId {
        let tenant = self.resolve();
        if !self.session.config().resolve_loopback_tenant || !tenant.is_loopback() {
            return tenant;
        }

        let remote = self.resolve_remote().await;
        if remote.is_empty() {
            return tenant;
        }

        debug!(local = %tenant, remote = %remote, "Using remote tenant for loopback host");
        let remote = TenantId::new(remote);
        self.session.set_tenant(remote.clone());
        remote
    }
}
