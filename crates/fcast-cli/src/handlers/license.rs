//! License command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use crate::bootstrap::CliContext;
use crate::commands::LicenseCommand;
use crate::presentation::{print_lines, render_license};

/// Dispatch a license subcommand.
pub async fn execute(ctx: &CliContext, command: LicenseCommand) -> Result<()> {
    ctx.require_server().await?;
    let warning_days = ctx.orchestrator().session().config().license_warning_days;

    let license = match command {
        LicenseCommand::Show => ctx.metrics().fetch_license().await?,
        LicenseCommand::Update { license, file } => {
            let text = match (license, file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_license_file(&path)?,
                (None, None) => String::new(),
            };
            let updated = ctx.orchestrator().update_license(&text).await?;
            println!("License updated.\n");
            updated
        }
    };

    print_lines(&render_license(&license, warning_days));
    Ok(())
}

fn read_license_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read license file {}", path.display()))
}
