//! End-to-end scenarios over the public API, with in-memory ports.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fcast_core::{
    AuthProfile, Command, CommandPort, ConfigOrchestrator, CreateTime, DataSourceOption,
    ForecastError, ForecastResult, HostPort, HostSession, MemoryAddressCache, MetricStatus,
    NewMetric, ServerAddress, SessionConfig, SessionContext, metrics_from_value, normalize,
    simulation_from_value, unwrap_envelope,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Records every command and answers from a fixed envelope.
struct RecordingCommands {
    sent: Mutex<Vec<String>>,
    envelope: Value,
}

impl RecordingCommands {
    fn new(envelope: Value) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            envelope,
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandPort for RecordingCommands {
    async fn send(&self, command: &Command) -> ForecastResult<Value> {
        self.sent.lock().unwrap().push(command.name().to_string());
        unwrap_envelope(self.envelope.clone())
    }

    async fn probe(&self, _address: &ServerAddress) -> ForecastResult<Value> {
        unwrap_envelope(json!({"status": "success", "results": "ok"}))
    }
}

struct StaticHost {
    forecasting_server: &'static str,
}

#[async_trait]
impl HostPort for StaticHost {
    async fn forecasting_server(&self) -> ForecastResult<String> {
        Ok(self.forecasting_server.to_string())
    }

    async fn data_sources(&self) -> ForecastResult<Vec<DataSourceOption>> {
        Ok(vec![DataSourceOption::named("Prometheus", None)])
    }

    async fn backend_service(&self, _command: &Command) -> ForecastResult<Value> {
        Err(ForecastError::transport("proxy unavailable"))
    }
}

struct NoReload;

#[async_trait]
impl HostSession for NoReload {
    async fn reload(&self) -> ForecastResult<()> {
        Ok(())
    }
}

fn orchestrator(commands: Arc<RecordingCommands>, forecasting_server: &'static str) -> ConfigOrchestrator {
    let session = Arc::new(SessionContext::new(
        SessionConfig::new("https://grafana.example.com"),
        Arc::new(MemoryAddressCache::new()),
    ));
    ConfigOrchestrator::new(
        session,
        commands,
        Arc::new(StaticHost { forecasting_server }),
        Arc::new(NoReload),
    )
}

#[test]
fn column_oriented_listing_transposes_to_rows() {
    let metrics = metrics_from_value(&json!({
        "metrics_name": {"0": "cpu"},
        "predict_name": {"0": "cpu_p"},
        "statement": {"0": "sum(cpu)"},
        "status": {"0": "running"},
        "create_time": {"0": 1_700_000_000_000_i64}
    }));

    assert_eq!(metrics.len(), 1);
    let metric = &metrics[0];
    assert_eq!(metric.key, "0");
    assert_eq!(metric.metrics_name, "cpu");
    assert_eq!(metric.predict_name, "cpu_p");
    assert_eq!(metric.statement, "sum(cpu)");
    assert_eq!(metric.status, MetricStatus::Running);
    assert_eq!(metric.create_time, CreateTime::Millis(1_700_000_000_000));
    assert!(!metric.create_time.display().is_empty());
}

#[test]
fn column_oriented_listing_keys_are_row_indices() {
    let names: Vec<String> = (0..12).map(|i| format!("m{i}")).collect();
    let column = |prefix: &str| -> Value {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (i.to_string(), json!(format!("{prefix}{name}"))))
            .collect::<serde_json::Map<_, _>>()
            .into()
    };

    let metrics = metrics_from_value(&json!({
        "metrics_name": column(""),
        "predict_name": column("p_"),
        "statement": column("q_"),
        "status": column(""),
        "create_time": column("")
    }));

    assert_eq!(metrics.len(), 12);
    for (i, metric) in metrics.iter().enumerate() {
        assert_eq!(metric.key, i.to_string());
        assert_eq!(metric.metrics_name, format!("m{i}"));
    }
}

#[test]
fn simulation_transposes_to_points() {
    let points = simulation_from_value(&json!({
        "ds": ["2024-03-01 00:00:00", "2024-03-01 00:05:00"],
        "actual": ["1.0", "2.0"],
        "forecasting": ["1.1", "2.2"]
    }));

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].time, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    assert_eq!(points[0].actual, Some(1.0));
    assert_eq!(points[0].forecasting, Some(1.1));
    assert_eq!(points[1].time, Utc.with_ymd_and_hms(2024, 3, 1, 0, 5, 0).unwrap());
    assert_eq!(points[1].actual, Some(2.0));
    assert_eq!(points[1].forecasting, Some(2.2));
}

#[test]
fn normalized_profiles_are_full_or_empty() {
    let payloads = [
        json!({"url": "http://prom", "token": "t"}),
        json!({"url": {"0": "http://prom"}, "auth_type": {"0": "basic"}, "username": {"0": "u"}}),
        json!({"url": {"1": "http://prom"}, "auth_type": "basic"}),
        json!({"url": "", "token": "t", "auth_type": "basic", "username": "u"}),
        json!({"token": {"0": "t"}}),
        json!("garbage"),
        json!(null),
    ];

    for payload in &payloads {
        let profile = normalize(payload);
        if profile.api_url().is_empty() {
            assert_eq!(profile, AuthProfile::empty(), "payload {payload}");
        } else {
            let expected = !profile.api_key().is_empty()
                || (profile.auth_type() == fcast_core::AuthType::Basic
                    && !profile.username().is_empty());
            assert_eq!(profile.is_api_key_set(), expected, "payload {payload}");
        }
    }
}

#[test]
fn envelope_status_decides_business_errors() {
    assert!(unwrap_envelope(json!({"status": "success", "results": "fine"})).is_ok());
    assert!(unwrap_envelope(json!({"status": "success", "results": null})).is_ok());

    let err = unwrap_envelope(json!({"status": "fail", "results": "quota exceeded"})).unwrap_err();
    assert_eq!(err, ForecastError::business("quota exceeded"));
}

#[tokio::test]
async fn add_rejection_is_business_and_does_not_relist() {
    let commands = Arc::new(RecordingCommands::new(
        json!({"status": "fail", "results": "duplicate name"}),
    ));
    let orchestrator = orchestrator(commands.clone(), "srv:1");

    let err = orchestrator
        .metrics()
        .add(NewMetric::new("cpu", "sum(cpu)", "Prometheus"))
        .await
        .unwrap_err();

    assert_eq!(err, ForecastError::business("duplicate name"));
    assert_eq!(commands.sent(), vec!["add_metrics".to_string()]);
}

#[tokio::test]
async fn sentinel_server_dispatches_nothing() {
    let commands = Arc::new(RecordingCommands::new(json!({"status": "success", "results": []})));
    let orchestrator = orchestrator(commands.clone(), "none");

    let snapshot = orchestrator.start_session().await;

    assert!(!snapshot.allows_mutations());
    assert!(orchestrator.servers().require_server().await.is_err());
    assert!(commands.sent().is_empty());
}

#[tokio::test]
async fn configured_server_runs_every_startup_fetch() {
    let commands = Arc::new(RecordingCommands::new(json!({"status": "success", "results": []})));
    let orchestrator = orchestrator(commands.clone(), "srv:1");

    let snapshot = orchestrator.start_session().await;

    assert!(snapshot.allows_mutations());
    assert_eq!(
        snapshot.preferred_data_source().map(|o| o.value.as_str()),
        Some("Prometheus")
    );
    let mut sent = commands.sent();
    sent.sort();
    assert_eq!(
        sent,
        vec![
            "get_grafana_query_config",
            "get_grafana_write_config",
            "query_grafana_metrics",
            "query_license",
        ]
    );
}
