//! Status command handler.
//!
//! Starts a session the way the plugin's configuration page does and prints
//! what each startup task produced.

use anyhow::Result;
use fcast_core::{ServerResolution, SessionSnapshot, Settled};

use crate::bootstrap::CliContext;
use crate::presentation::{print_lines, render_license, render_profile};

/// Execute the status command.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let snapshot = ctx.orchestrator().start_session().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let warning_days = ctx.orchestrator().session().config().license_warning_days;
        print_lines(&render_status(&snapshot, warning_days));
    }
    Ok(())
}

/// Render a session snapshot; failed tasks show their user-facing message.
pub fn render_status(snapshot: &SessionSnapshot, warning_days: i64) -> Vec<String> {
    let mut lines = vec![format!("Tenant: {}", snapshot.tenant)];

    match &snapshot.server {
        ServerResolution::Configured(address) => lines.push(format!("Server: {address}")),
        ServerResolution::Unconfigured => {
            lines.push("Server: not configured".to_string());
            lines.push(fcast_core::UNCONFIGURED_MESSAGE.to_string());
            return lines;
        }
    }

    lines.push(String::new());
    match &snapshot.license {
        Settled::Ready(license) => lines.extend(render_license(license, warning_days)),
        other => lines.push(format!("License: {}", unavailable(other))),
    }

    for (label, profile) in [
        ("query", &snapshot.query_profile),
        ("write", &snapshot.write_profile),
    ] {
        lines.push(String::new());
        match profile {
            Settled::Ready(profile) => lines.extend(render_profile(label, profile)),
            other => lines.push(format!("{label} profile: {}", unavailable(other))),
        }
    }

    lines.push(String::new());
    match &snapshot.metrics {
        Settled::Ready(metrics) => lines.push(format!("Metrics: {}", metrics.len())),
        other => lines.push(format!("Metrics: {}", unavailable(other))),
    }

    match &snapshot.data_sources {
        Settled::Ready(sources) => {
            let names: Vec<&str> = sources.iter().map(|s| s.label.as_str()).collect();
            lines.push(format!("Data sources: {}", names.join(", ")));
            if let Some(preferred) = snapshot.preferred_data_source() {
                lines.push(format!("Default data source: {}", preferred.label));
            }
        }
        other => lines.push(format!("Data sources: {}", unavailable(other))),
    }

    lines
}

fn unavailable<T>(settled: &Settled<T>) -> String {
    settled
        .error()
        .map_or_else(|| "skipped".to_string(), fcast_core::ForecastError::user_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{ScriptedCommands, StaticHost, context};
    use fcast_core::ForecastError;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unconfigured_status_shows_remediation() {
        let commands = Arc::new(ScriptedCommands::default());
        let ctx = context(commands.clone(), Arc::new(StaticHost::new("none")));

        let snapshot = ctx.orchestrator().start_session().await;
        let lines = render_status(&snapshot, 15);

        assert_eq!(lines[0], "Tenant: grafana.example.com");
        assert_eq!(lines[1], "Server: not configured");
        assert!(lines[2].contains("GF_PLUGINS_FORECASTING_SERVER"));
        assert!(commands.sent().is_empty());
    }

    #[tokio::test]
    async fn test_status_keeps_partial_results() {
        let commands = Arc::new(
            ScriptedCommands::default()
                .respond(
                    "query_license",
                    Ok(json!({"license_type": "trial", "expired_date": 40})),
                )
                .respond(
                    "get_grafana_query_config",
                    Ok(json!({"url": "http://prom:9090", "auth_type": "bearer", "token": "t"})),
                )
                .respond(
                    "get_grafana_write_config",
                    Err(ForecastError::business("write profile missing")),
                )
                .respond("query_grafana_metrics", Ok(json!([{"metrics_name": "cpu"}]))),
        );
        let ctx = context(commands, Arc::new(StaticHost::new("10.0.0.4:8000")));

        let snapshot = ctx.orchestrator().start_session().await;
        let rendered = render_status(&snapshot, 15).join("\n");

        assert!(rendered.contains("Server: 10.0.0.4:8000"));
        assert!(rendered.contains("License type: trial"));
        assert!(rendered.contains("http://prom:9090"));
        assert!(rendered.contains("write profile: write profile missing"));
        assert!(rendered.contains("Metrics: 1"));
        assert!(rendered.contains("Default data source: Prometheus"));
    }
}
