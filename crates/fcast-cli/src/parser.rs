//! Main CLI parser and top-level argument handling.
//!
//! Global options describe the host instance and where local state lives; each
//! has an environment fallback so the binary can be driven from a `.env` file.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface for the forecasting plugin.
#[derive(Parser)]
#[command(name = "fcast")]
#[command(about = "Manage forecasting metrics, thresholds and plugin settings")]
#[command(version)]
pub struct Cli {
    /// Dashboard base URL; its hostname identifies the tenant
    #[arg(
        long = "host-url",
        env = "FCAST_HOST_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    pub host_url: String,

    /// Plugin id used in host API paths
    #[arg(
        long = "plugin-id",
        env = "FCAST_PLUGIN_ID",
        default_value = fcast_http::DEFAULT_PLUGIN_ID,
        global = true
    )]
    pub plugin_id: String,

    /// Bearer token for the host API
    #[arg(long = "host-token", env = "FCAST_HOST_TOKEN", hide_env_values = true, global = true)]
    pub host_token: Option<String>,

    /// Token added to plugin-proxy commands
    #[arg(
        long = "service-token",
        env = "FCAST_SERVICE_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub service_token: Option<String>,

    /// Directory holding the cached server address
    #[arg(long = "data-dir", env = "FCAST_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Ask the host for the tenant when the host URL is a loopback address
    #[arg(long = "resolve-loopback-tenant", global = true)]
    pub resolve_loopback_tenant: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
