#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod commands;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod paths;
pub mod payload;
pub mod ports;
pub mod services;
pub mod session;

// Re-export commonly used types for convenience
pub use cache::{FileAddressCache, MemoryAddressCache};
pub use commands::{Command, RegisterProfile};
pub use domain::{
    AuthProfile, AuthType, CreateTime, DEFAULT_LICENSE_WARNING_DAYS, DataSourceOption,
    LOWER_THRESHOLD_RANGE, LicenseState, Metric, MetricStatus, NewMetric, ProfileDraft,
    ProfileKind, ServerAddress, SimulationPoint, THRESHOLD_STEP, TenantId, ThresholdPair,
    UNCONFIGURED_SENTINEL, UPPER_THRESHOLD_RANGE, preferred_data_source,
};
pub use envelope::{ResponseEnvelope, SUCCESS_STATUS, unwrap_envelope};
pub use error::{ForecastError, ForecastResult, GENERIC_FAILURE_MESSAGE, UNCONFIGURED_MESSAGE};
pub use normalize::normalize;
pub use paths::{DATA_DIR_ENV, SERVER_ADDRESS_FILE, data_root, server_address_path};
pub use ports::{AddressCache, CommandPort, HostPort, HostSession};
pub use services::{
    ConfigOrchestrator, ConnectionStatus, MetricsService, ServerAddressStore, ServerResolution,
    SessionSnapshot, Settled, TenantResolver, metrics_from_value, simulation_from_value,
};
pub use session::{DEFAULT_RELOAD_DELAY, ServerState, SessionConfig, SessionContext};
