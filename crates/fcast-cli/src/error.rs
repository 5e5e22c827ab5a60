//! CLI-specific error types and mappings.
//!
//! Maps `ForecastError` to exit codes and the text shown on the terminal.

use fcast_core::{ForecastError, GENERIC_FAILURE_MESSAGE};
use thiserror::Error;
use tracing::debug;

/// CLI-specific error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CliError {
    /// The forecasting server rejected the request; message is its reason.
    #[error("{0}")]
    Rejected(String),

    /// Argument or input error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("{0}")]
    Io(String),

    /// No forecasting server is configured.
    #[error("{0}")]
    Config(String),

    /// The server or the host could not be reached or answered garbage.
    #[error("{0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Rejected(_) => 1,
            Self::Arguments(_) => 2,
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }

    /// Classify an error bubbled up from a handler.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cli) = err.downcast_ref::<Self>() {
            return cli.clone();
        }
        if let Some(forecast) = err.downcast_ref::<ForecastError>() {
            return Self::from(forecast.clone());
        }
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return Self::from_io(io);
        }
        debug!(error = ?err, "Unclassified failure");
        Self::Unavailable(GENERIC_FAILURE_MESSAGE.to_string())
    }

    fn from_io(err: &std::io::Error) -> Self {
        Self::Io(format!("IO error: {err}"))
    }
}

impl From<ForecastError> for CliError {
    fn from(err: ForecastError) -> Self {
        let message = err.user_message();
        match err {
            ForecastError::Business { .. } => Self::Rejected(message),
            ForecastError::Validation(_) => Self::Arguments(message),
            ForecastError::Unconfigured => Self::Config(message),
            ForecastError::Storage { .. } => {
                debug!(error = %err, "Local storage failure");
                Self::Io(message)
            }
            ForecastError::Transport { .. } | ForecastError::InvalidResponse { .. } => {
                Self::Unavailable(message)
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io(&err)
    }
}
