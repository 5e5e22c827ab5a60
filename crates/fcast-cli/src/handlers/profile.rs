//! Auth profile command handlers.

use anyhow::Result;
use fcast_core::{ProfileDraft, ProfileKind};

use crate::bootstrap::CliContext;
use crate::commands::ProfileCommand;
use crate::presentation::{print_lines, render_profile};

/// Dispatch a profile subcommand.
pub async fn execute(ctx: &CliContext, command: ProfileCommand) -> Result<()> {
    ctx.require_server().await?;

    match command {
        ProfileCommand::Show { kind } => {
            print_lines(&show(ctx, ProfileKind::from(kind)).await?);
        }
        ProfileCommand::Save {
            kind,
            url,
            auth_type,
            token,
            username,
            password,
            no_restart,
        } => {
            let kind = ProfileKind::from(kind);
            let draft = ProfileDraft {
                api_url: url,
                auth_type: auth_type.map(Into::into),
                token: token.unwrap_or_default(),
                username: username.unwrap_or_default(),
                password: password.unwrap_or_default(),
            };

            if no_restart {
                ctx.orchestrator().save_profile(kind, draft).await?;
            } else {
                ctx.orchestrator().save_profile_and_apply(kind, draft).await?;
            }
            println!("The {kind} profile has been saved.");
        }
    }
    Ok(())
}

/// Fetch one profile and render it for the terminal.
async fn show(ctx: &CliContext, kind: ProfileKind) -> Result<Vec<String>> {
    let profile = ctx.orchestrator().fetch_profile(kind).await?;
    Ok(render_profile(kind.label(), &profile))
}
