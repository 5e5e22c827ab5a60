//! Command handlers that delegate to the orchestrator.
//!
//! Handlers follow the same pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that parse CLI input, call the orchestrator or one of its
//!   services, and format output for the terminal
//!
//! Handlers that send envelope commands resolve the server first through
//! [`CliContext::require_server`](crate::bootstrap::CliContext::require_server).

pub mod license;
pub mod metrics;
pub mod profile;
pub mod server;
pub mod status;
pub mod threshold;

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted ports for handler tests.

    use async_trait::async_trait;
    use fcast_core::{
        Command, CommandPort, DataSourceOption, ForecastError, ForecastResult, HostPort,
        MemoryAddressCache, ServerAddress, SessionConfig, SessionContext,
    };
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::bootstrap::{CliContext, bootstrap_with};
    use crate::restart::RestartNotice;

    /// Answers envelope commands by wire name and records what was sent.
    #[derive(Default)]
    pub struct ScriptedCommands {
        responses: Mutex<HashMap<&'static str, ForecastResult<Value>>>,
        sent: Mutex<Vec<Command>>,
    }

    impl ScriptedCommands {
        pub fn respond(self, command: &'static str, response: ForecastResult<Value>) -> Self {
            self.responses.lock().unwrap().insert(command, response);
            self
        }

        pub fn sent(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl CommandPort for ScriptedCommands {
        async fn send(&self, command: &Command) -> ForecastResult<Value> {
            self.sent.lock().unwrap().push(command.clone());
            self.responses
                .lock()
                .unwrap()
                .get(command.name())
                .cloned()
                .unwrap_or_else(|| Err(ForecastError::transport("Not Found")))
        }

        async fn probe(&self, _address: &ServerAddress) -> ForecastResult<Value> {
            self.responses
                .lock()
                .unwrap()
                .get("connection")
                .cloned()
                .unwrap_or_else(|| Err(ForecastError::transport("Not Found")))
        }
    }

    /// Host with a fixed admin config and data source list.
    pub struct StaticHost {
        pub server: String,
        pub data_sources: Vec<DataSourceOption>,
        pub backend: Mutex<Vec<Command>>,
    }

    impl StaticHost {
        pub fn new(server: &str) -> Self {
            Self {
                server: server.to_string(),
                data_sources: vec![
                    DataSourceOption::named("Loki", Some("loki".to_string())),
                    DataSourceOption::named("Prometheus", Some("prometheus".to_string())),
                ],
                backend: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HostPort for StaticHost {
        async fn forecasting_server(&self) -> ForecastResult<String> {
            Ok(self.server.clone())
        }

        async fn data_sources(&self) -> ForecastResult<Vec<DataSourceOption>> {
            Ok(self.data_sources.clone())
        }

        async fn backend_service(&self, command: &Command) -> ForecastResult<Value> {
            self.backend.lock().unwrap().push(command.clone());
            Ok(Value::Object(serde_json::Map::new()))
        }
    }

    pub fn context(
        commands: Arc<ScriptedCommands>,
        host: Arc<StaticHost>,
    ) -> CliContext {
        let session = Arc::new(SessionContext::new(
            SessionConfig::new("https://grafana.example.com")
                .with_reload_delay(std::time::Duration::ZERO),
            Arc::new(MemoryAddressCache::new()),
        ));
        bootstrap_with(session, commands, host, Arc::new(RestartNotice))
    }
}
