//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define what the core expects from the transport and the host. They
//! use only domain types; adapters (`fcast-http`, the CLI) map their own errors
//! into [`ForecastError`](crate::ForecastError) at the boundary.

pub mod address_cache;
pub mod command;
pub mod host;
pub mod host_session;

pub use address_cache::AddressCache;
pub use command::CommandPort;
pub use host::HostPort;
pub use host_session::HostSession;

#[cfg(test)]
pub use address_cache::MockAddressCache;
#[cfg(test)]
pub use command::MockCommandPort;
#[cfg(test)]
pub use host::MockHostPort;
#[cfg(test)]
pub use host_session::MockHostSession;
