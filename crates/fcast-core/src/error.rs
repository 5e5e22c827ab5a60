//! Canonical error type for forecasting operations.
//!
//! Adapters map their implementation-specific errors (HTTP, JSON, filesystem)
//! into `ForecastError` at the boundary. Presentation code only ever needs to
//! tell a [`ForecastError::Business`] apart from everything else.

use thiserror::Error;

/// Message shown to end users for failures they cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Please contact your system administrator to check the forecasting server configuration";

/// Remediation shown when no forecasting server is configured.
pub const UNCONFIGURED_MESSAGE: &str = "Please setup server address first, add environment variable \
     GF_PLUGINS_FORECASTING_SERVER={your_server_address} to your grafana server";

/// Result type alias for forecasting operations.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Errors from forecasting operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForecastError {
    /// The server understood the command and rejected it.
    #[error("{message}")]
    Business {
        /// Server-supplied reason, shown verbatim
        message: String,
    },

    /// Non-2xx response or network failure.
    #[error("Request failed: {message}")]
    Transport {
        /// Derived from the HTTP status text or the network error
        message: String,
    },

    /// The response could not be decoded.
    #[error("Invalid response from forecasting server: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// No forecasting server address is configured.
    #[error("Forecasting server is not configured")]
    Unconfigured,

    /// Input rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// Reading or writing host-local state failed.
    #[error("Local storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },
}

impl ForecastError {
    /// Create a business error from a server-supplied reason.
    pub fn business(message: impl Into<String>) -> Self {
        Self::Business {
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the server explicitly rejected the operation.
    pub const fn is_business(&self) -> bool {
        matches!(self, Self::Business { .. })
    }

    /// Whether the failure is the blocking "no server configured" state.
    pub const fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Unconfigured)
    }

    /// Text suitable for showing to an end user.
    ///
    /// Business and validation messages are passed through verbatim; transport,
    /// decoding and storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Business { message } => message.clone(),
            Self::Validation(message) => message.clone(),
            Self::Unconfigured => UNCONFIGURED_MESSAGE.to_string(),
            Self::Transport { .. } | Self::InvalidResponse { .. } | Self::Storage { .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
