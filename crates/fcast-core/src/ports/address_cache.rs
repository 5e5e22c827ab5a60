//! Host-local persistence of the forecasting server address.

use crate::error::ForecastResult;

/// Single-key store for the last known server address.
///
/// Implementations are last-write-wins; no locking across processes.
#[cfg_attr(test, mockall::automock)]
pub trait AddressCache: Send + Sync {
    /// The cached address, if any.
    fn load(&self) -> ForecastResult<Option<String>>;

    /// Replace the cached address.
    fn store(&self, address: &str) -> ForecastResult<()>;

    /// Remove the cached address.
    fn clear(&self) -> ForecastResult<()>;
}
