//! Threshold command handlers.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use fcast_core::ThresholdPair;

use crate::bootstrap::CliContext;
use crate::commands::ThresholdCommand;
use crate::presentation::{print_lines, render_simulation_rows, render_thresholds};

/// Dispatch a threshold subcommand.
///
/// Threshold values are validated before the server is contacted.
pub async fn execute(ctx: &CliContext, command: ThresholdCommand) -> Result<()> {
    match command {
        ThresholdCommand::Show { name } => {
            ctx.require_server().await?;
            let thresholds = ctx.metrics().query_threshold(&name).await?;
            print_lines(&render_thresholds(&name, &thresholds));
        }
        ThresholdCommand::Simulate {
            name,
            upper,
            lower,
            date,
        } => {
            let pair = ThresholdPair::new(upper, lower)?;
            ctx.require_server().await?;
            simulate(ctx, &name, pair, date.unwrap_or_else(today)).await?;
        }
        ThresholdCommand::Update { name, upper, lower } => {
            let pair = ThresholdPair::new(upper, lower)?;
            ctx.require_server().await?;
            ctx.metrics().update_threshold(&name, pair).await?;
            println!(
                "Thresholds for '{name}' saved (upper {:.2}, lower {:.2}).",
                pair.upper_threshold, pair.lower_threshold
            );
        }
    }
    Ok(())
}

async fn simulate(ctx: &CliContext, name: &str, pair: ThresholdPair, date: NaiveDate) -> Result<()> {
    let points = ctx.metrics().simulate_threshold(name, pair, date).await?;
    if points.is_empty() {
        println!("No simulation data for '{name}' on {date}.");
        return Ok(());
    }
    print_lines(&render_simulation_rows(&points));
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
