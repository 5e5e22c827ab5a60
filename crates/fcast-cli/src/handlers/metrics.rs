//! Metrics command handlers.
//!
//! Adding or deleting a metric re-lists afterwards so the operator sees the
//! server's view, the same way the metrics page refreshes its table.

use anyhow::Result;
use fcast_core::{NewMetric, preferred_data_source};
use tracing::{debug, warn};

use crate::bootstrap::CliContext;
use crate::commands::MetricsCommand;
use crate::error::CliError;
use crate::presentation::{print_lines, print_separator, render_metric_rows};
use crate::utils::input;

/// Dispatch a metrics subcommand.
pub async fn execute(ctx: &CliContext, command: MetricsCommand) -> Result<()> {
    ctx.require_server().await?;

    match command {
        MetricsCommand::List => list(ctx).await,
        MetricsCommand::Add {
            name,
            statement,
            datasource,
        } => add(ctx, name, statement, datasource).await,
        MetricsCommand::Delete { name, force } => {
            if !force && !input::prompt_confirmation(&format!("Delete metric '{name}'?"))? {
                println!("Delete operation cancelled.");
                return Ok(());
            }
            delete(ctx, &name).await
        }
    }
}

async fn list(ctx: &CliContext) -> Result<()> {
    let metrics = ctx.metrics().list().await?;

    if metrics.is_empty() {
        println!("No metrics defined.");
        println!("Use 'fcast metrics add <name> <statement>' to add one.");
        return Ok(());
    }

    println!("Found {} metric(s):\n", metrics.len());
    let rows = render_metric_rows(&metrics);
    if let Some((header, body)) = rows.split_first() {
        println!("{header}");
        print_separator(header.len());
        print_lines(body);
    }
    Ok(())
}

/// Create a metric, defaulting the data source to the preferred one.
async fn add(
    ctx: &CliContext,
    name: String,
    statement: String,
    datasource: Option<String>,
) -> Result<()> {
    let datasource = match datasource {
        Some(datasource) => datasource,
        None => {
            let sources = ctx.orchestrator().data_sources().await?;
            let preferred = preferred_data_source(&sources).ok_or_else(|| {
                CliError::Arguments("Please select a data source".to_string())
            })?;
            debug!(datasource = %preferred.value, "Using preferred data source");
            preferred.value.clone()
        }
    };

    ctx.metrics()
        .add(NewMetric::new(name.clone(), statement, datasource))
        .await?;
    println!("Metric '{name}' added.\n");
    list(ctx).await
}

/// Delete a metric, then re-list whatever the outcome.
async fn delete(ctx: &CliContext, name: &str) -> Result<()> {
    match ctx.metrics().delete(name).await {
        Ok(()) => {
            println!("Metric '{name}' deleted.\n");
            list(ctx).await
        }
        Err(e) => {
            if let Err(list_err) = list(ctx).await {
                warn!(error = %list_err, "Failed to refresh metrics after delete failure");
            }
            Err(e.into())
        }
    }
}
