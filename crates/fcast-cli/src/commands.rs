//! Commands enum and subcommands.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use fcast_core::{AuthType, ProfileKind};
use std::path::PathBuf;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start a session and print everything it loaded
    Status {
        /// Print the session snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect, test or register the forecasting server
    Server {
        #[command(subcommand)]
        command: ServerCommand,
    },

    /// Manage metric definitions
    Metrics {
        #[command(subcommand)]
        command: MetricsCommand,
    },

    /// Inspect, simulate or save alerting thresholds
    Threshold {
        #[command(subcommand)]
        command: ThresholdCommand,
    },

    /// Show or replace the license
    License {
        #[command(subcommand)]
        command: LicenseCommand,
    },

    /// Show or save the query and write auth profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Subcommand)]
pub enum ServerCommand {
    /// Show the configured server and the address registered for this tenant
    Show,
    /// Probe a server (defaults to the configured one)
    Test {
        /// Address to probe, e.g. 10.0.0.4:8000
        address: Option<String>,
    },
    /// Register an address for this tenant and cache it locally
    Register {
        /// Address to register
        address: String,
    },
}

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// List metric definitions
    List,
    /// Create a metric definition
    Add {
        /// Unique metric name
        name: String,
        /// Query statement evaluated against the data source
        statement: String,
        /// Data source name (defaults to the first Prometheus source)
        #[arg(short, long)]
        datasource: Option<String>,
    },
    /// Delete a metric definition
    Delete {
        /// Metric to delete
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ThresholdCommand {
    /// Show the saved thresholds for a metric
    Show {
        /// Metric name
        name: String,
    },
    /// Simulate thresholds against one day of history
    Simulate {
        /// Metric name
        name: String,
        /// Upper multiplier (1.00-1.50)
        #[arg(long)]
        upper: f64,
        /// Lower multiplier (0.50-1.00)
        #[arg(long)]
        lower: f64,
        /// Day to simulate, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Save thresholds for a metric
    Update {
        /// Metric name
        name: String,
        /// Upper multiplier (1.00-1.50)
        #[arg(long)]
        upper: f64,
        /// Lower multiplier (0.50-1.00)
        #[arg(long)]
        lower: f64,
    },
}

#[derive(Subcommand)]
pub enum LicenseCommand {
    /// Show the current license
    Show,
    /// Replace the license
    Update {
        /// License text as issued
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        license: Option<String>,
        /// Read the license text from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show an auth profile
    Show {
        /// Which profile
        #[arg(value_enum, default_value = "query")]
        kind: ProfileArg,
    },
    /// Save an auth profile and restart the host session
    Save {
        /// Which profile
        #[arg(value_enum)]
        kind: ProfileArg,
        /// Metrics endpoint URL
        #[arg(long)]
        url: String,
        /// Authentication scheme (defaults to basic)
        #[arg(long = "auth-type", value_enum)]
        auth_type: Option<AuthArg>,
        /// Bearer token
        #[arg(long)]
        token: Option<String>,
        /// Basic-auth username
        #[arg(long)]
        username: Option<String>,
        /// Basic-auth password
        #[arg(long, env = "FCAST_PROFILE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Save without restarting the host session
        #[arg(long)]
        no_restart: bool,
    },
}

/// Profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Query,
    Write,
}

impl From<ProfileArg> for ProfileKind {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Query => Self::Query,
            ProfileArg::Write => Self::Write,
        }
    }
}

/// Authentication scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthArg {
    Bearer,
    Basic,
}

impl From<AuthArg> for AuthType {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::Bearer => Self::Bearer,
            AuthArg::Basic => Self::Basic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_simulate_parses_date() {
        let cli = Cli::parse_from([
            "fcast", "threshold", "simulate", "cpu", "--upper", "1.2", "--lower", "0.8", "--date",
            "2024-03-09",
        ]);
        let Some(Commands::Threshold {
            command: ThresholdCommand::Simulate { name, date, .. },
        }) = cli.command
        else {
            panic!("expected threshold simulate");
        };
        assert_eq!(name, "cpu");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9));
    }

    #[test]
    fn test_license_update_needs_text_or_file() {
        assert!(Cli::try_parse_from(["fcast", "license", "update"]).is_err());
        assert!(Cli::try_parse_from(["fcast", "license", "update", "--file", "lic.txt"]).is_ok());
        assert!(
            Cli::try_parse_from(["fcast", "license", "update", "abc", "--file", "lic.txt"])
                .is_err()
        );
    }

    #[test]
    fn test_profile_save_args() {
        let cli = Cli::parse_from([
            "fcast",
            "profile",
            "save",
            "write",
            "--url",
            "http://mimir:9009",
            "--auth-type",
            "bearer",
            "--token",
            "glsa_x",
        ]);
        let Some(Commands::Profile {
            command: ProfileCommand::Save {
                kind, auth_type, ..
            },
        }) = cli.command
        else {
            panic!("expected profile save");
        };
        assert_eq!(ProfileKind::from(kind), ProfileKind::Write);
        assert_eq!(auth_type.map(AuthType::from), Some(AuthType::Bearer));
    }
}
