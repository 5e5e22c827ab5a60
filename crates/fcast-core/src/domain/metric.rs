//! Metric definitions managed on the forecasting server.

use chrono::{Local, TimeZone};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::commands::Command;
use crate::error::{ForecastError, ForecastResult};
use crate::payload::scalar_string;

/// Lifecycle state of a metric, driven entirely by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Running,
    Initializing,
    Failed,
    Unknown,
}

impl MetricStatus {
    /// Parse a server status string; unrecognised values map to `Unknown`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "initializing" => Self::Initializing,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Initializing => "initializing",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation timestamp exactly as the server sent it.
///
/// The raw value is canonical; [`CreateTime::display`] renders it in local time
/// for presentation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTime {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// Any other textual form.
    Text(String),
    /// The server sent nothing usable.
    Missing,
}

impl CreateTime {
    /// Decode a raw server value.
    #[allow(clippy::cast_possible_truncation)] // Epoch millis fit in i64
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map_or(Self::Missing, Self::Millis),
            Value::String(s) if s.trim().is_empty() => Self::Missing,
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_or_else(|_| Self::Text(s.clone()), Self::Millis),
            _ => Self::Missing,
        }
    }

    /// Local-time rendering for display.
    pub fn display(&self) -> String {
        match self {
            Self::Millis(ms) => Local
                .timestamp_millis_opt(*ms)
                .single()
                .map_or_else(|| ms.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            Self::Text(text) => text.clone(),
            Self::Missing => String::new(),
        }
    }
}

impl Serialize for CreateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Millis(ms) => serializer.serialize_i64(*ms),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

/// A metric definition as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    /// Row key, unique within one listing
    pub key: String,
    pub metrics_name: String,
    pub predict_name: String,
    pub statement: String,
    pub status: MetricStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_message: Option<String>,
    pub create_time: CreateTime,
}

impl Metric {
    /// Build a metric from a row object, keyed by `index` unless the row
    /// carries its own key.
    pub fn from_row(row: &Map<String, Value>, index: usize) -> Self {
        let text = |field: &str| row.get(field).and_then(scalar_string).unwrap_or_default();

        let key = row
            .get("key")
            .and_then(scalar_string)
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| index.to_string());

        Self {
            key,
            metrics_name: text("metrics_name"),
            predict_name: text("predict_name"),
            statement: text("statement"),
            status: MetricStatus::from_wire(&text("status")),
            failed_message: row
                .get("failed_message")
                .and_then(scalar_string)
                .filter(|m| !m.is_empty()),
            create_time: row
                .get("create_time")
                .map_or(CreateTime::Missing, CreateTime::from_value),
        }
    }

    /// Failure reason worth surfacing, only for failed metrics.
    pub fn failure_reason(&self) -> Option<&str> {
        if self.status == MetricStatus::Failed {
            self.failed_message.as_deref()
        } else {
            None
        }
    }
}

/// Input for creating a metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMetric {
    pub metrics_name: String,
    pub statement: String,
    pub datasource: String,
}

impl NewMetric {
    pub fn new(
        metrics_name: impl Into<String>,
        statement: impl Into<String>,
        datasource: impl Into<String>,
    ) -> Self {
        Self {
            metrics_name: metrics_name.into(),
            statement: statement.into(),
            datasource: datasource.into(),
        }
    }

    /// Validate and convert into the `add_metrics` command.
    pub fn into_command(self) -> ForecastResult<Command> {
        let metrics_name = self.metrics_name.trim().to_string();
        let statement = self.statement.trim().to_string();
        let datasource = self.datasource.trim().to_string();

        if metrics_name.is_empty() {
            return Err(ForecastError::Validation(
                "Please input metrics name".to_string(),
            ));
        }
        if statement.is_empty() {
            return Err(ForecastError::Validation(
                "Please input query statement".to_string(),
            ));
        }
        if datasource.is_empty() {
            return Err(ForecastError::Validation(
                "Please select a data source".to_string(),
            ));
        }

        Ok(Command::AddMetrics {
            metrics_name,
            statement,
            datasource,
        })
    }
}
