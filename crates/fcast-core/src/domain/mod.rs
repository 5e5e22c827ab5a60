//! Domain types for forecasting configuration and metric management.

mod auth;
mod datasource;
mod license;
mod metric;
mod server;
mod threshold;

pub use auth::{AuthProfile, AuthType, ProfileDraft, ProfileKind};
pub use datasource::{DataSourceOption, preferred_data_source};
pub use license::{DEFAULT_LICENSE_WARNING_DAYS, LicenseState};
pub use metric::{CreateTime, Metric, MetricStatus, NewMetric};
pub use server::{ServerAddress, TenantId, UNCONFIGURED_SENTINEL};
pub use threshold::{
    LOWER_THRESHOLD_RANGE, SimulationPoint, THRESHOLD_STEP, ThresholdPair, UPPER_THRESHOLD_RANGE,
};
