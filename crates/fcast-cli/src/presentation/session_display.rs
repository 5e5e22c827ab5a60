//! Rendering of metrics, thresholds, licenses and auth profiles.
//!
//! Functions return lines instead of printing so handlers stay testable.

use fcast_core::{AuthProfile, LicenseState, Metric, SimulationPoint, ThresholdPair};

use super::tables::{format_optional, mask_secret, truncate_string};

/// Header plus one line per metric.
pub fn render_metric_rows(metrics: &[Metric]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<4} {:<24} {:<24} {:<13} {:<20} Statement",
        "Key", "Name", "Predict Name", "Status", "Created"
    )];

    for metric in metrics {
        lines.push(format!(
            "{:<4} {:<24} {:<24} {:<13} {:<20} {}",
            truncate_string(&metric.key, 4),
            truncate_string(&metric.metrics_name, 23),
            truncate_string(&metric.predict_name, 23),
            metric.status.as_str(),
            metric.create_time.display(),
            truncate_string(&metric.statement, 60),
        ));
        if let Some(reason) = metric.failure_reason() {
            lines.push(format!("     failed: {reason}"));
        }
    }

    lines
}

pub fn render_thresholds(metrics_name: &str, thresholds: &ThresholdPair) -> Vec<String> {
    let mut lines = vec![
        format!("Thresholds for {metrics_name}:"),
        format!("  upper: {:.2}", thresholds.upper_threshold),
        format!("  lower: {:.2}", thresholds.lower_threshold),
    ];
    if !thresholds.is_within_bounds() {
        lines.push("  (outside the editable range)".to_string());
    }
    lines
}

/// Header plus one line per point, times in UTC.
pub fn render_simulation_rows(points: &[SimulationPoint]) -> Vec<String> {
    let mut lines = vec![format!("{:<20} {:>14} {:>14}", "Time", "Actual", "Forecast")];
    lines.extend(points.iter().map(|point| {
        format!(
            "{:<20} {:>14} {:>14}",
            point.time.format("%Y-%m-%d %H:%M:%S"),
            format_optional(point.actual, "--"),
            format_optional(point.forecasting, "--"),
        )
    }));
    lines
}

pub fn render_license(license: &LicenseState, warning_days: i64) -> Vec<String> {
    let mut lines = vec![
        format!("License type: {}", license.license_type),
        format!("Expires in:   {} day(s)", license.expired_date),
    ];
    if license.expires_soon(warning_days) {
        lines.push("Warning: the license will expire soon, please renew it.".to_string());
    }
    lines
}

/// Profile fields with secrets masked.
pub fn render_profile(label: &str, profile: &AuthProfile) -> Vec<String> {
    if profile.is_empty() {
        return vec![format!("{label} profile: not configured")];
    }

    let mut lines = vec![
        format!("{label} profile:"),
        format!("  url:       {}", profile.api_url()),
        format!("  auth type: {}", profile.auth_type()),
    ];
    if profile.username().is_empty() {
        lines.push(format!("  token:     {}", mask_secret(profile.api_key())));
    } else {
        lines.push(format!("  username:  {}", profile.username()));
        lines.push(format!("  password:  {}", mask_secret(profile.password())));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fcast_core::AuthType;
    use serde_json::json;

    #[test]
    fn test_metric_rows_show_failure_reason() {
        let row = json!({
            "metrics_name": "cpu",
            "predict_name": "cpu_predict",
            "statement": "sum(rate(cpu[5m]))",
            "status": "failed",
            "failed_message": "no data"
        });
        let metric = Metric::from_row(row.as_object().unwrap(), 0);

        let lines = render_metric_rows(&[metric]);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("cpu_predict"));
        assert!(lines[1].contains("failed"));
        assert!(lines[2].contains("no data"));
    }

    #[test]
    fn test_thresholds_flag_out_of_range_values() {
        let pair = ThresholdPair::from_value(&json!({
            "upper_threshold": 1.8,
            "lower_threshold": 0.9
        }))
        .unwrap();
        let lines = render_thresholds("cpu", &pair);
        assert_eq!(lines[1], "  upper: 1.80");
        assert!(lines.last().unwrap().contains("outside"));
    }

    #[test]
    fn test_simulation_rows_render_missing_values() {
        let points = [SimulationPoint {
            time: Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap(),
            actual: Some(3.5),
            forecasting: None,
        }];
        let lines = render_simulation_rows(&points);
        assert!(lines[1].starts_with("2024-03-09 10:00:00"));
        assert!(lines[1].contains("3.5"));
        assert!(lines[1].trim_end().ends_with("--"));
    }

    #[test]
    fn test_license_warning() {
        let license = LicenseState::from_value(&json!({
            "license_type": "trial",
            "expired_date": 3
        }))
        .unwrap();
        assert_eq!(render_license(&license, 15).len(), 3);
        assert_eq!(render_license(&license, 2).len(), 2);
    }

    #[test]
    fn test_profile_masks_secrets() {
        let profile = AuthProfile::resolved("http://prom:9090", "glsa_secret", AuthType::Bearer, "", "");
        let rendered = render_profile("query", &profile).join("\n");
        assert!(rendered.contains("http://prom:9090"));
        assert!(!rendered.contains("glsa_secret"));

        let empty = render_profile("write", &AuthProfile::empty());
        assert_eq!(empty, vec!["write profile: not configured".to_string()]);
    }
}
