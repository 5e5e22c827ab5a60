//! License state reported by the forecasting server.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ForecastError, ForecastResult};
use crate::payload::{scalar_f64, scalar_string};

/// Days-to-expiry below which the license warning is shown.
pub const DEFAULT_LICENSE_WARNING_DAYS: i64 = 15;

/// Current license. Read-only; replaced wholesale by `update_license`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseState {
    pub license_type: String,
    /// Days until the license expires
    pub expired_date: i64,
}

impl LicenseState {
    /// Decode the `query_license` results payload.
    #[allow(clippy::cast_possible_truncation)] // Day counts are small
    pub fn from_value(value: &Value) -> ForecastResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ForecastError::invalid_response("license payload is not an object"))?;

        let license_type = object
            .get("license_type")
            .and_then(scalar_string)
            .ok_or_else(|| ForecastError::invalid_response("license_type missing"))?;

        let expired_date = object
            .get("expired_date")
            .and_then(scalar_f64)
            .ok_or_else(|| ForecastError::invalid_response("expired_date missing or not numeric"))?
            .floor() as i64;

        Ok(Self {
            license_type,
            expired_date,
        })
    }

    /// Whether the license expires in fewer than `threshold_days` days.
    pub const fn expires_soon(&self, threshold_days: i64) -> bool {
        self.expired_date < threshold_days
    }
}
