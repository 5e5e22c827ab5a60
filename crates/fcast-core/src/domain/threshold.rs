//! Alerting threshold multipliers and simulation output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::ops::RangeInclusive;

use crate::error::{ForecastError, ForecastResult};
use crate::payload::scalar_f64;

/// Allowed range for the upper multiplier.
pub const UPPER_THRESHOLD_RANGE: RangeInclusive<f64> = 1.00..=1.50;
/// Allowed range for the lower multiplier.
pub const LOWER_THRESHOLD_RANGE: RangeInclusive<f64> = 0.50..=1.00;
/// Granularity of both multipliers.
pub const THRESHOLD_STEP: f64 = 0.01;
const STEPS_PER_UNIT: f64 = 100.0;

/// Upper and lower multipliers for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdPair {
    pub upper_threshold: f64,
    pub lower_threshold: f64,
}

impl ThresholdPair {
    /// Validated pair for sending to the server, snapped to the 0.01 step.
    pub fn new(upper: f64, lower: f64) -> ForecastResult<Self> {
        let upper_threshold = snap(upper);
        let lower_threshold = snap(lower);

        if !UPPER_THRESHOLD_RANGE.contains(&upper_threshold) {
            return Err(ForecastError::Validation(format!(
                "Upper threshold must be between {:.2} and {:.2}, got {upper}",
                UPPER_THRESHOLD_RANGE.start(),
                UPPER_THRESHOLD_RANGE.end()
            )));
        }
        if !LOWER_THRESHOLD_RANGE.contains(&lower_threshold) {
            return Err(ForecastError::Validation(format!(
                "Lower threshold must be between {:.2} and {:.2}, got {lower}",
                LOWER_THRESHOLD_RANGE.start(),
                LOWER_THRESHOLD_RANGE.end()
            )));
        }

        Ok(Self {
            upper_threshold,
            lower_threshold,
        })
    }

    /// Decode the `query_threshold` payload.
    ///
    /// Values are kept exactly as the server returned them, even when they
    /// fall outside the editable ranges.
    pub fn from_value(value: &Value) -> ForecastResult<Self> {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(scalar_f64)
                .ok_or_else(|| ForecastError::invalid_response(format!("{name} missing or not numeric")))
        };

        Ok(Self {
            upper_threshold: field("upper_threshold")?,
            lower_threshold: field("lower_threshold")?,
        })
    }

    /// Whether both values are inside the editable ranges.
    pub fn is_within_bounds(&self) -> bool {
        UPPER_THRESHOLD_RANGE.contains(&self.upper_threshold)
            && LOWER_THRESHOLD_RANGE.contains(&self.lower_threshold)
    }
}

fn snap(value: f64) -> f64 {
    (value * STEPS_PER_UNIT).round() / STEPS_PER_UNIT
}

/// One point of a threshold simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationPoint {
    pub time: DateTime<Utc>,
    /// `None` when the server value was not numeric
    pub actual: Option<f64>,
    pub forecasting: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_new_accepts_range_edges() {
        let pair = assert_ok!(ThresholdPair::new(1.5, 0.5));
        assert!((pair.upper_threshold - 1.5).abs() < f64::EPSILON);
        assert!((pair.lower_threshold - 0.5).abs() < f64::EPSILON);
        assert_ok!(ThresholdPair::new(1.0, 1.0));
    }

    #[test]
    fn test_new_snaps_to_step() {
        let pair = ThresholdPair::new(1.234, 0.876).unwrap();
        assert!((pair.upper_threshold - 1.23).abs() < 1e-9);
        assert!((pair.lower_threshold - 0.88).abs() < 1e-9);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            ThresholdPair::new(1.6, 0.8),
            Err(ForecastError::Validation(m)) if m.contains("Upper")
        ));
        assert!(matches!(
            ThresholdPair::new(1.2, 0.4),
            Err(ForecastError::Validation(m)) if m.contains("Lower")
        ));
    }

    #[test]
    fn test_from_value_keeps_server_values() {
        let pair =
            ThresholdPair::from_value(&json!({"upper_threshold": 1.8, "lower_threshold": "0.3"}))
                .unwrap();
        assert!((pair.upper_threshold - 1.8).abs() < f64::EPSILON);
        assert!((pair.lower_threshold - 0.3).abs() < f64::EPSILON);
        assert!(!pair.is_within_bounds());
    }

    #[test]
    fn test_from_value_requires_both_fields() {
        assert_err!(ThresholdPair::from_value(&json!({"upper_threshold": 1.2})));
    }
}
