#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod restart;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::{
    AuthArg, Commands, LicenseCommand, MetricsCommand, ProfileArg, ProfileCommand, ServerCommand,
    ThresholdCommand,
};
pub use error::CliError;
pub use parser::Cli;
pub use restart::RestartNotice;
