//! Local data directory resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{ForecastError, ForecastResult};

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "FCAST_DATA_DIR";

/// File holding the cached forecasting server address.
pub const SERVER_ADDRESS_FILE: &str = "server_address.json";

/// Get the root directory for local state.
///
/// Resolution order:
/// 1. `FCAST_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/fcast`)
///
/// The directory is created if missing.
pub fn data_root() -> ForecastResult<PathBuf> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_dir()
            .ok_or_else(|| ForecastError::storage("Cannot determine system data directory"))?
            .join("fcast"),
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| {
            ForecastError::storage(format!("Failed to create directory {}: {e}", root.display()))
        })?;
    }

    Ok(root)
}

/// Path of the server address cache file.
pub fn server_address_path() -> ForecastResult<PathBuf> {
    Ok(data_root()?.join(SERVER_ADDRESS_FILE))
}
