//! Metric lifecycle, thresholds and license operations.

use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::commands::Command;
use crate::domain::{LicenseState, Metric, NewMetric, SimulationPoint, ThresholdPair};
use crate::error::{ForecastError, ForecastResult};
use crate::payload::{ColumnTable, column_values, decode_results, parse_time, scalar_f64};
use crate::ports::CommandPort;

/// Columns that mark a column-oriented metric listing.
const METRIC_COLUMNS: [&str; 4] = ["metrics_name", "predict_name", "statement", "create_time"];

/// Metric, threshold and license commands over the envelope.
#[derive(Clone)]
pub struct MetricsService {
    commands: Arc<dyn CommandPort>,
}

impl MetricsService {
    pub fn new(commands: Arc<dyn CommandPort>) -> Self {
        Self { commands }
    }

    /// List metric definitions.
    ///
    /// Transport and business failures are returned; a payload that cannot be
    /// understood yields an empty list.
    pub async fn list(&self) -> ForecastResult<Vec<Metric>> {
        let results = self.commands.send(&Command::QueryGrafanaMetrics).await?;
        let metrics = metrics_from_value(&results);
        debug!(count = metrics.len(), "Listed metrics");
        Ok(metrics)
    }

    /// Create a metric. A business error is the server's verbatim reason.
    pub async fn add(&self, metric: NewMetric) -> ForecastResult<()> {
        let command = metric.into_command()?;
        self.commands.send(&command).await?;
        Ok(())
    }

    /// Delete a metric. Callers re-list afterwards whatever the outcome.
    pub async fn delete(&self, metrics_name: &str) -> ForecastResult<()> {
        let metrics_name = required_name(metrics_name)?;
        self.commands
            .send(&Command::DeleteMetrics { metrics_name })
            .await?;
        Ok(())
    }

    /// The server's current thresholds for a metric, unclamped.
    pub async fn query_threshold(&self, metrics_name: &str) -> ForecastResult<ThresholdPair> {
        let metrics_name = required_name(metrics_name)?;
        let results = self
            .commands
            .send(&Command::QueryThreshold { metrics_name })
            .await?;
        ThresholdPair::from_value(&results)
    }

    /// Simulate `thresholds` against the history of one day.
    ///
    /// Malformed series degrade to fewer (or no) points.
    pub async fn simulate_threshold(
        &self,
        metrics_name: &str,
        thresholds: ThresholdPair,
        date: NaiveDate,
    ) -> ForecastResult<Vec<SimulationPoint>> {
        let command = Command::ThresholdSimulate {
            metrics_name: required_name(metrics_name)?,
            upper_threshold: thresholds.upper_threshold,
            lower_threshold: thresholds.lower_threshold,
            simulate_date: date,
        };
        let results = self.commands.send(&command).await?;
        Ok(simulation_from_value(&results))
    }

    pub async fn update_threshold(
        &self,
        metrics_name: &str,
        thresholds: ThresholdPair,
    ) -> ForecastResult<()> {
        let command = Command::UpdateThreshold {
            metrics_name: required_name(metrics_name)?,
            upper_threshold: thresholds.upper_threshold,
            lower_threshold: thresholds.lower_threshold,
        };
        self.commands.send(&command).await?;
        Ok(())
    }

    pub async fn fetch_license(&self) -> ForecastResult<LicenseState> {
        let results = self.commands.send(&Command::QueryLicense).await?;
        LicenseState::from_value(&results)
    }

    /// Replace the license with `license`, as issued.
    pub async fn update_license(&self, license: &str) -> ForecastResult<()> {
        let license = license.trim();
        if license.is_empty() {
            return Err(ForecastError::Validation(
                "Please input license".to_string(),
            ));
        }
        self.commands
            .send(&Command::UpdateLicense {
                license: license.to_string(),
            })
            .await?;
        Ok(())
    }
}

fn required_name(metrics_name: &str) -> ForecastResult<String> {
    let name = metrics_name.trim();
    if name.is_empty() {
        return Err(ForecastError::Validation(
            "Please input metrics name".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Decode a metric listing in any of the shapes the server produces.
///
/// - an array of row objects (non-objects are skipped)
/// - a column-oriented object, transposed into rows keyed `0..N-1`
/// - a single bare row object
///
/// Anything else is an empty list.
pub fn metrics_from_value(value: &Value) -> Vec<Metric> {
    let value = decode_results(value.clone());

    match &value {
        Value::Array(rows) => rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| row.as_object().map(|row| Metric::from_row(row, index)))
            .collect(),
        Value::Object(row) => ColumnTable::detect(&value, &METRIC_COLUMNS).map_or_else(
            || vec![Metric::from_row(row, 0)],
            |table| {
                table
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(index, row)| {
                        let mut metric = Metric::from_row(row, index);
                        metric.key = index.to_string();
                        metric
                    })
                    .collect()
            },
        ),
        other => {
            warn!(payload = %other, "Unrecognised metric listing, rendering empty");
            Vec::new()
        }
    }
}

/// Transpose a column-oriented simulation payload (`ds`, `actual`, `forecasting`).
///
/// The time column sets the length. Points whose time cannot be parsed are
/// dropped; non-numeric values become `None`.
pub fn simulation_from_value(value: &Value) -> Vec<SimulationPoint> {
    let value = decode_results(value.clone());
    let column = |name: &str| value.get(name).map(column_values).unwrap_or_default();

    let times = column("ds");
    let actual = column("actual");
    let forecasting = column("forecasting");

    let points: Vec<SimulationPoint> = times
        .iter()
        .enumerate()
        .filter_map(|(i, time)| {
            let Some(time) = parse_time(time) else {
                debug!(index = i, "Dropping simulation point with unparsable time");
                return None;
            };
            Some(SimulationPoint {
                time,
                actual: actual.get(i).copied().and_then(scalar_f64),
                forecasting: forecasting.get(i).copied().and_then(scalar_f64),
            })
        })
        .collect();

    if points.is_empty() && !times.is_empty() {
        warn!("Simulation payload had no usable points");
    }
    points
}
