//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging, bootstraps the context and routes
//! each command to its handler. Errors are mapped to exit codes here.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use fcast_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(config)?;

    match command {
        Commands::Status { json } => handlers::status::execute(&ctx, json).await,
        Commands::Server { command } => handlers::server::execute(&ctx, command).await,
        Commands::Metrics { command } => handlers::metrics::execute(&ctx, command).await,
        Commands::Threshold { command } => handlers::threshold::execute(&ctx, command).await,
        Commands::License { command } => handlers::license::execute(&ctx, command).await,
        Commands::Profile { command } => handlers::profile::execute(&ctx, command).await,
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::debug!(error = ?err, "Command failed");
        let cli_err = CliError::from_anyhow(&err);
        eprintln!("Error: {cli_err}");
        std::process::exit(cli_err.exit_code());
    }
}
