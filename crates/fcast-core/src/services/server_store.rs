//! Server address resolution, connectivity test and registration.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::commands::Command;
use crate::domain::{ServerAddress, TenantId};
use crate::error::{ForecastError, ForecastResult};
use crate::payload::scalar_string;
use crate::ports::{CommandPort, HostPort};
use crate::session::SessionContext;

/// Outcome of reading the admin config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "address", rename_all = "lowercase")]
pub enum ServerResolution {
    Configured(ServerAddress),
    Unconfigured,
}

impl ServerResolution {
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    pub const fn address(&self) -> Option<&ServerAddress> {
        match self {
            Self::Configured(address) => Some(address),
            Self::Unconfigured => None,
        }
    }
}

/// Result of a connectivity test. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Failed { reason: String },
}

impl ConnectionStatus {
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Resolves and persists the forecasting server address.
#[derive(Clone)]
pub struct ServerAddressStore {
    session: Arc<SessionContext>,
    host: Arc<dyn HostPort>,
    commands: Arc<dyn CommandPort>,
}

impl ServerAddressStore {
    pub fn new(
        session: Arc<SessionContext>,
        host: Arc<dyn HostPort>,
        commands: Arc<dyn CommandPort>,
    ) -> Self {
        Self {
            session,
            host,
            commands,
        }
    }

    /// Read the admin config and update the session.
    ///
    /// The sentinel or an empty value marks the session unconfigured and drops
    /// the cached address. A configured address is persisted locally. If the
    /// admin config cannot be read the session is left as it was and the
    /// result is `Unconfigured`.
    pub async fn configured_server(&self) -> ServerResolution {
        let raw = match self.host.forecasting_server().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read admin config");
                return ServerResolution::Unconfigured;
            }
        };

        match ServerAddress::parse(&raw) {
            Some(address) => {
                if let Err(e) = self.session.mark_configured(address.clone()) {
                    warn!(error = %e, "Failed to cache server address");
                }
                debug!(address = %address, "Forecasting server configured");
                ServerResolution::Configured(address)
            }
            None => {
                warn!("Forecasting server is not configured");
                self.session.mark_unconfigured();
                ServerResolution::Unconfigured
            }
        }
    }

    /// Like [`configured_server`](Self::configured_server), but unconfigured is an error.
    pub async fn require_server(&self) -> ForecastResult<ServerAddress> {
        match self.configured_server().await {
            ServerResolution::Configured(address) => Ok(address),
            ServerResolution::Unconfigured => Err(ForecastError::Unconfigured),
        }
    }

    /// The address the session would use right now, without asking the host.
    pub fn current(&self) -> Option<ServerAddress> {
        self.session.server_address()
    }

    /// Probe `address` with a bare `connection` command.
    ///
    /// Connected only when the server answers with results `"ok"`.
    pub async fn test_connection(&self, address: &ServerAddress) -> ConnectionStatus {
        match self.commands.probe(address).await {
            Ok(Value::String(results)) if results == "ok" => {
                info!(address = %address, "Connected to forecasting server");
                ConnectionStatus::Connected
            }
            Ok(other) => {
                warn!(address = %address, results = %other, "Unexpected connection response");
                ConnectionStatus::Failed {
                    reason: format!("unexpected response: {other}"),
                }
            }
            Err(e) => {
                warn!(address = %address, error = %e, "Connection test failed");
                ConnectionStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Look up the address registered for `tenant` through the host proxy.
    ///
    /// Best effort: any failure yields an empty string.
    pub async fn query_registered(&self, tenant: &TenantId) -> String {
        let command = Command::ServerQuery {
            domain: tenant.as_str().to_string(),
        };
        match self.host.backend_service(&command).await {
            Ok(value) => scalar_string(&value)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            Err(e) => {
                warn!(tenant = %tenant, error = %e, "Server address lookup failed");
                String::new()
            }
        }
    }

    /// Cache `address` locally and register it for the session tenant.
    ///
    /// The local cache is written first; a proxy response carrying a
    /// `message` is a rejection.
    pub async fn register(&self, address: &ServerAddress) -> ForecastResult<()> {
        self.session.remember_address(address)?;

        let tenant = self.session.tenant();
        let command = Command::ServerRegister {
            domain: tenant.as_str().to_string(),
            address: address.as_str().to_string(),
        };
        let response = self.host.backend_service(&command).await?;

        if let Some(message) = response
            .get("message")
            .and_then(scalar_string)
            .filter(|m| !m.trim().is_empty())
        {
            warn!(tenant = %tenant, reason = %message, "Server registration rejected");
            return Err(ForecastError::business(message));
        }

        info!(tenant = %tenant, address = %address, "Server address registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryAddressCache;
    use crate::ports::{AddressCache, MockCommandPort, MockHostPort};
    use crate::session::{ServerState, SessionConfig};
    use serde_json::json;

    struct Fixture {
        cache: Arc<MemoryAddressCache>,
        session: Arc<SessionContext>,
    }

    fn fixture(cached: Option<&str>) -> Fixture {
        let cache = Arc::new(cached.map_or_else(MemoryAddressCache::new, MemoryAddressCache::with_address));
        let session = Arc::new(SessionContext::new(
            SessionConfig::new("https://grafana.example.com"),
            cache.clone(),
        ));
        Fixture { cache, session }
    }

    fn store(fx: &Fixture, host: MockHostPort, commands: MockCommandPort) -> ServerAddressStore {
        ServerAddressStore::new(fx.session.clone(), Arc::new(host), Arc::new(commands))
    }

    #[tokio::test]
    async fn test_sentinel_is_unconfigured_and_clears_cache() {
        let fx = fixture(Some("old:1"));
        let mut host = MockHostPort::new();
        host.expect_forecasting_server()
            .returning(|| Ok("none".to_string()));

        let servers = store(&fx, host, MockCommandPort::new());
        assert_eq!(servers.configured_server().await, ServerResolution::Unconfigured);
        assert_eq!(fx.session.server_state(), ServerState::Unconfigured);
        assert_eq!(fx.cache.load().unwrap(), None);
        assert!(servers.require_server().await.unwrap_err().is_unconfigured());
    }

    #[tokio::test]
    async fn test_configured_address_is_cached() {
        let fx = fixture(None);
        let mut host = MockHostPort::new();
        host.expect_forecasting_server()
            .returning(|| Ok("10.0.0.2:8000".to_string()));

        let servers = store(&fx, host, MockCommandPort::new());
        let resolution = servers.configured_server().await;
        assert_eq!(resolution.address().map(ServerAddress::as_str), Some("10.0.0.2:8000"));
        assert_eq!(fx.cache.load().unwrap().as_deref(), Some("10.0.0.2:8000"));
    }

    #[tokio::test]
    async fn test_admin_read_failure_keeps_cache() {
        let fx = fixture(Some("cached:1"));
        let mut host = MockHostPort::new();
        host.expect_forecasting_server()
            .returning(|| Err(ForecastError::transport("Service Unavailable")));

        let servers = store(&fx, host, MockCommandPort::new());
        assert_eq!(servers.configured_server().await, ServerResolution::Unconfigured);
        assert_eq!(fx.session.server_state(), ServerState::Unknown);
        assert_eq!(fx.cache.load().unwrap().as_deref(), Some("cached:1"));
    }

    #[tokio::test]
    async fn test_connection_ok() {
        let fx = fixture(None);
        let mut commands = MockCommandPort::new();
        commands
            .expect_probe()
            .withf(|address| address.as_str() == "srv:9")
            .returning(|_| Ok(json!("ok")));

        let servers = store(&fx, MockHostPort::new(), commands);
        let status = servers
            .test_connection(&ServerAddress::parse("srv:9").unwrap())
            .await;
        assert!(status.is_connected());
    }

    #[tokio::test]
    async fn test_connection_failures_do_not_raise() {
        let fx = fixture(None);
        let mut commands = MockCommandPort::new();
        let mut calls = 0;
        commands.expect_probe().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(json!("degraded"))
            } else {
                Err(ForecastError::transport("Not Found"))
            }
        });

        let servers = store(&fx, MockHostPort::new(), commands);
        let address = ServerAddress::parse("srv:9").unwrap();
        assert!(!servers.test_connection(&address).await.is_connected());
        let ConnectionStatus::Failed { reason } = servers.test_connection(&address).await else {
            panic!("expected failure");
        };
        assert!(reason.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_query_registered_is_best_effort() {
        let fx = fixture(None);
        let mut host = MockHostPort::new();
        host.expect_backend_service()
            .withf(|cmd| matches!(cmd, Command::ServerQuery { domain } if domain == "grafana.example.com"))
            .returning(|_| Err(ForecastError::transport("Bad Gateway")));

        let servers = store(&fx, host, MockCommandPort::new());
        assert_eq!(servers.query_registered(&fx.session.tenant()).await, "");
    }

    #[tokio::test]
    async fn test_register_caches_then_calls_proxy() {
        let fx = fixture(None);
        let mut host = MockHostPort::new();
        host.expect_backend_service()
            .withf(|cmd| {
                matches!(cmd, Command::ServerRegister { domain, address }
                    if domain == "grafana.example.com" && address == "new:1")
            })
            .times(1)
            .returning(|_| Ok(json!({"status": "ok"})));

        let servers = store(&fx, host, MockCommandPort::new());
        servers
            .register(&ServerAddress::parse("new:1").unwrap())
            .await
            .unwrap();
        assert_eq!(fx.cache.load().unwrap().as_deref(), Some("new:1"));
    }

    #[tokio::test]
    async fn test_register_rejection_is_business() {
        let fx = fixture(None);
        let mut host = MockHostPort::new();
        host.expect_backend_service()
            .returning(|_| Ok(json!({"message": "domain already registered"})));

        let servers = store(&fx, host, MockCommandPort::new());
        let err = servers
            .register(&ServerAddress::parse("new:1").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, ForecastError::business("domain already registered"));
    }
}
