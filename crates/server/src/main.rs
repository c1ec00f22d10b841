use anyhow::Result;
use clap::Parser;
use railway_core::{ApiConfig, GraphQlClient};
use railway_mcp::{tools, McpHandler};
use std::sync::Arc;

mod api;

#[derive(Parser, Debug)]
#[command(name = "railway-mcp-server")]
#[command(about = "MCP server exposing the Railway control-plane API as agent tools", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Transport mode. Consumed by deployment tooling; this binary always
    /// serves HTTP.
    #[arg(long, env = "MCP_TRANSPORT", default_value = "http")]
    transport: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Railway MCP server");
    if args.transport != "http" {
        tracing::warn!(transport = %args.transport, "Unsupported transport mode, serving http");
    }

    // Configuration is read from the environment once, here, and carried in
    // the client from then on.
    let config = ApiConfig::from_env()?;
    if config.token.is_none() {
        tracing::warn!(
            "{} is not set; tool calls will fail until it is provided",
            railway_core::config::TOKEN_ENV_VAR
        );
    }

    let client = Arc::new(GraphQlClient::new(config)?);
    let registry = tools::build_registry(client);
    tracing::info!("Registered {} tools", registry.len());

    let handler = Arc::new(McpHandler::new(
        registry,
        api::SERVER_NAME,
        env!("CARGO_PKG_VERSION"),
    ));

    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, handler).await
}
