//! Commands understood by the forecasting server.
//!
//! Every command serializes to a flat JSON object carrying its fields plus a
//! `command` discriminator; the envelope adds the `tenant` before sending.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::domain::{AuthType, TenantId};
use crate::error::{ForecastError, ForecastResult};

/// Credentials sent when registering a query or write profile.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterProfile {
    /// Metrics endpoint URL
    pub grafana_url: String,
    /// Bearer token, empty for basic auth
    pub token: String,
    /// Authentication scheme
    pub auth_type: AuthType,
    /// Basic-auth username, empty for bearer auth
    pub username: String,
    /// Basic-auth password, empty for bearer auth
    pub password: String,
}

impl fmt::Debug for RegisterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterProfile")
            .field("grafana_url", &self.grafana_url)
            .field("token", &redact(&self.token))
            .field("auth_type", &self.auth_type)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

/// A command for the forecasting server (or the host's plugin proxy).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Connectivity probe.
    Connection,
    /// Read the current license.
    QueryLicense,
    /// Replace the license wholesale.
    UpdateLicense {
        /// License text as issued
        license: String,
    },
    /// Read the query (read) auth profile.
    GetGrafanaQueryConfig,
    /// Read the write auth profile.
    GetGrafanaWriteConfig,
    /// List metric definitions.
    QueryGrafanaMetrics,
    /// Create a metric definition.
    AddMetrics {
        /// Unique metric name
        metrics_name: String,
        /// Query statement evaluated against the data source
        statement: String,
        /// Data source name
        datasource: String,
    },
    /// Delete a metric definition.
    DeleteMetrics {
        /// Metric to delete
        metrics_name: String,
    },
    /// Read a metric's threshold pair.
    QueryThreshold {
        /// Metric to read
        metrics_name: String,
    },
    /// Simulate a threshold pair against one day of history.
    ThresholdSimulate {
        /// Metric to simulate
        metrics_name: String,
        /// Upper multiplier
        upper_threshold: f64,
        /// Lower multiplier
        lower_threshold: f64,
        /// Day to simulate, `YYYY-MM-DD`
        simulate_date: NaiveDate,
    },
    /// Persist a metric's threshold pair.
    UpdateThreshold {
        /// Metric to update
        metrics_name: String,
        /// Upper multiplier
        upper_threshold: f64,
        /// Lower multiplier
        lower_threshold: f64,
    },
    /// Register the forecasting server address for a tenant (plugin proxy).
    ServerRegister {
        /// Tenant the address belongs to
        domain: String,
        /// Address being registered
        address: String,
    },
    /// Look up the registered server address for a tenant (plugin proxy).
    ServerQuery {
        /// Tenant to look up
        domain: String,
    },
    /// Ask the plugin proxy for the caller's remote address (plugin proxy).
    RemoteAddress,
    /// Save the query auth profile.
    GrafanaQueryRegister(RegisterProfile),
    /// Save the write auth profile.
    GrafanaWriteRegister(RegisterProfile),
}

impl Command {
    /// The wire name of the command.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::QueryLicense => "query_license",
            Self::UpdateLicense { .. } => "update_license",
            Self::GetGrafanaQueryConfig => "get_grafana_query_config",
            Self::GetGrafanaWriteConfig => "get_grafana_write_config",
            Self::QueryGrafanaMetrics => "query_grafana_metrics",
            Self::AddMetrics { .. } => "add_metrics",
            Self::DeleteMetrics { .. } => "delete_metrics",
            Self::QueryThreshold { .. } => "query_threshold",
            Self::ThresholdSimulate { .. } => "threshold_simulate",
            Self::UpdateThreshold { .. } => "update_threshold",
            Self::ServerRegister { .. } => "server_register",
            Self::ServerQuery { .. } => "server_query",
            Self::RemoteAddress => "remote_address",
            Self::GrafanaQueryRegister(_) => "grafana_query_register",
            Self::GrafanaWriteRegister(_) => "grafana_write_register",
        }
    }

    /// Whether the command changes server-side state.
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::UpdateLicense { .. }
                | Self::AddMetrics { .. }
                | Self::DeleteMetrics { .. }
                | Self::UpdateThreshold { .. }
                | Self::ServerRegister { .. }
                | Self::GrafanaQueryRegister(_)
                | Self::GrafanaWriteRegister(_)
        )
    }

    /// Build the JSON request body, stamping the tenant when one is given.
    pub fn to_body(&self, tenant: Option<&TenantId>) -> ForecastResult<Value> {
        let mut body = serde_json::to_value(self).map_err(|e| {
            ForecastError::Validation(format!("Cannot encode command {}: {e}", self.name()))
        })?;

        if let (Some(tenant), Value::Object(map)) = (tenant, &mut body) {
            map.insert("tenant".to_string(), Value::String(tenant.as_str().to_string()));
        }

        Ok(body)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
