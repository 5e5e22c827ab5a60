//! Services orchestrating the ports.

mod metrics;
mod orchestrator;
mod server_store;
mod tenant;

pub use metrics::{MetricsService, metrics_from_value, simulation_from_value};
pub use orchestrator::{ConfigOrchestrator, SessionSnapshot, Settled};
pub use server_store::{ConnectionStatus, ServerAddressStore, ServerResolution};
pub use tenant::TenantResolver;
