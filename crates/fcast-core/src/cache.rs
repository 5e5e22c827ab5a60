//! Host-local cache of the forecasting server address.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::error::{ForecastError, ForecastResult};
use crate::paths::server_address_path;
use crate::ports::AddressCache;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CachedAddress {
    #[serde(default)]
    forecasting_server: Option<String>,
}

/// JSON-file cache: `{"forecasting_server": "<address>"}`. Last write wins.
#[derive(Debug, Clone)]
pub struct FileAddressCache {
    path: PathBuf,
}

impl FileAddressCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at the default location under the data root.
    pub fn open_default() -> ForecastResult<Self> {
        Ok(Self::new(server_address_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AddressCache for FileAddressCache {
    fn load(&self) -> ForecastResult<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ForecastError::storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        let cached: CachedAddress = serde_json::from_str(&contents).map_err(|e| {
            ForecastError::storage(format!("Corrupt cache file {}: {e}", self.path.display()))
        })?;
        Ok(cached.forecasting_server.filter(|s| !s.trim().is_empty()))
    }

    fn store(&self, address: &str) -> ForecastResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ForecastError::storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let body = serde_json::to_string_pretty(&CachedAddress {
            forecasting_server: Some(address.to_string()),
        })
        .map_err(|e| ForecastError::storage(e.to_string()))?;

        fs::write(&self.path, body).map_err(|e| {
            ForecastError::storage(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), "Cached forecasting server address");
        Ok(())
    }

    fn clear(&self) -> ForecastResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ForecastError::storage(format!(
                "Failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-process cache, for tests and for sessions that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryAddressCache {
    address: Mutex<Option<String>>,
}

impl MemoryAddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Mutex::new(Some(address.into())),
        }
    }
}

impl AddressCache for MemoryAddressCache {
    fn load(&self) -> ForecastResult<Option<String>> {
        Ok(self
            .address
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, address: &str) -> ForecastResult<()> {
        *self.address.lock().unwrap_or_else(PoisonError::into_inner) = Some(address.to_string());
        Ok(())
    }

    fn clear(&self) -> ForecastResult<()> {
        *self.address.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
