//! Commands sent to the forecasting server through the response envelope.

use fcast_core::{Command, ForecastError, ForecastResult, ResponseEnvelope, ServerAddress};
use serde_json::Value;
use tracing::{debug, warn};

use super::ForecastClient;
use crate::http::{HttpBackend, Target};
use crate::port::map_error;
use crate::url::server_url;

impl<B: HttpBackend> ForecastClient<B> {
    /// Send `command` to the session's server and unwrap the envelope.
    ///
    /// Read commands may fall back to the cached address; mutating commands
    /// go out only once admin config has confirmed the server.
    pub(crate) async fn send_command(&self, command: &Command) -> ForecastResult<Value> {
        let address = if command.is_mutating() {
            self.session.mutation_address()
        } else {
            self.session.server_address()
        };
        let Some(address) = address else {
            warn!(
                command = %command,
                state = ?self.session.server_state(),
                "No confirmed forecasting server, command not sent"
            );
            return Err(ForecastError::Unconfigured);
        };

        let tenant = self.session.tenant();
        let body = command.to_body(Some(&tenant))?;
        let url = server_url(&address).map_err(map_error)?;
        debug!(command = %command, tenant = %tenant, url = %url, "Sending command");

        let response = self
            .backend
            .post_json(Target::Forecasting, &url, &body)
            .await
            .map_err(|e| {
                warn!(command = %command, error = %e, "Command transport failure");
                map_error(e)
            })?;

        ResponseEnvelope::from_value(response)?
            .into_results()
            .inspect_err(|e| match e {
                ForecastError::Business { message } => {
                    warn!(command = %command, reason = %message, "Command rejected by server");
                }
                other => debug!(command = %command, error = %other, "Command failed"),
            })
    }

    /// Post a bare `connection` probe to `address`.
    ///
    /// Skips the session gating; the envelope is unwrapped like any command.
    pub(crate) async fn probe_address(&self, address: &ServerAddress) -> ForecastResult<Value> {
        let url = server_url(address).map_err(map_error)?;
        let body = Command::Connection.to_body(None)?;
        debug!(url = %url, "Probing forecasting server");

        let response = self
            .backend
            .post_json(Target::Forecasting, &url, &body)
            .await
            .map_err(map_error)?;

        ResponseEnvelope::from_value(response)?.into_results()
    }
}
