//! Server command handlers.

use anyhow::Result;
use fcast_core::{ConnectionStatus, ServerAddress, ServerResolution};

use crate::bootstrap::CliContext;
use crate::commands::ServerCommand;
use crate::error::CliError;

/// Dispatch a server subcommand.
pub async fn execute(ctx: &CliContext, command: ServerCommand) -> Result<()> {
    match command {
        ServerCommand::Show => show(ctx).await,
        ServerCommand::Test { address } => test(ctx, address.as_deref()).await,
        ServerCommand::Register { address } => register(ctx, &address).await,
    }
}

async fn show(ctx: &CliContext) -> Result<()> {
    let tenant = ctx.orchestrator().tenants().resolve_effective().await;
    println!("Tenant:     {tenant}");

    match ctx.servers().configured_server().await {
        ServerResolution::Configured(address) => println!("Configured: {address}"),
        ServerResolution::Unconfigured => println!("Configured: (none)"),
    }

    let registered = ctx.servers().query_registered(&tenant).await;
    if registered.is_empty() {
        println!("Registered: (none)");
    } else {
        println!("Registered: {registered}");
    }
    Ok(())
}

/// Probe `address`, or the configured server when none is given.
async fn test(ctx: &CliContext, address: Option<&str>) -> Result<()> {
    let address = match address {
        Some(raw) => parse_address(raw)?,
        None => ctx.require_server().await?,
    };

    match ctx.servers().test_connection(&address).await {
        ConnectionStatus::Connected => {
            println!("Connected to {address}");
            Ok(())
        }
        ConnectionStatus::Failed { reason } => {
            Err(CliError::Unavailable(format!("Connection to {address} failed: {reason}")).into())
        }
    }
}

async fn register(ctx: &CliContext, raw: &str) -> Result<()> {
    let address = parse_address(raw)?;
    ctx.servers().register(&address).await?;
    println!(
        "Registered {address} for {}",
        ctx.orchestrator().session().tenant()
    );
    Ok(())
}

fn parse_address(raw: &str) -> Result<ServerAddress, CliError> {
    ServerAddress::parse(raw)
        .ok_or_else(|| CliError::Arguments(format!("'{raw}' is not a server address")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{ScriptedCommands, StaticHost, context};
    use fcast_core::Command;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_parse_address_rejects_sentinel() {
        assert!(parse_address("10.0.0.4:8000").is_ok());
        assert!(matches!(parse_address("none"), Err(CliError::Arguments(_))));
        assert!(parse_address("  ").is_err());
    }

    #[tokio::test]
    async fn test_connection_failure_is_unavailable() {
        let commands = Arc::new(
            ScriptedCommands::default().respond("connection", Ok(json!("license expired"))),
        );
        let ctx = context(commands, Arc::new(StaticHost::new("10.0.0.4:8000")));

        let err = test(&ctx, None).await.unwrap_err();
        assert_eq!(CliError::from_anyhow(&err).exit_code(), 69);
    }

    #[tokio::test]
    async fn test_connection_unconfigured_is_config_error() {
        let ctx = context(
            Arc::new(ScriptedCommands::default()),
            Arc::new(StaticHost::new("")),
        );
        let err = test(&ctx, None).await.unwrap_err();
        assert_eq!(CliError::from_anyhow(&err).exit_code(), 78);
    }

    #[tokio::test]
    async fn test_register_goes_through_host_proxy() {
        let host = Arc::new(StaticHost::new("none"));
        let ctx = context(Arc::new(ScriptedCommands::default()), host.clone());

        register(&ctx, "10.0.0.9:8000").await.unwrap();

        let sent = host.backend.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![Command::ServerRegister {
                domain: "grafana.example.com".to_string(),
                address: "10.0.0.9:8000".to_string(),
            }]
        );
        assert_eq!(
            ctx.servers().current().map(|a| a.as_str().to_string()),
            Some("10.0.0.9:8000".to_string())
        );
    }
}
