//! Mealie MCP server - main entry point.
//!
//! Connects to Mealie, then serves the meal plan tools and prompts over
//! stdio until the client disconnects or the process is interrupted.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mealie_mcp::mcp::{McpRouter, McpServer};
use mealie_mcp::mealie::MealieClient;
use mealie_mcp::tools::ToolRegistry;
use mealie_mcp::types::{ENV_API_KEY, ENV_BASE_URL, ENV_LOG_FILE, ENV_REQUEST_TIMEOUT};
use mealie_mcp::Config;

#[derive(Debug, Parser)]
#[command(name = "mealie-mcp-server", version, about = "MCP server for Mealie meal plans")]
struct Args {
    /// Mealie base URL.
    #[arg(long, env = ENV_BASE_URL)]
    base_url: Option<String>,

    /// Mealie API token.
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    api_key: Option<String>,

    /// Per-request timeout, e.g. `30s` or `1m`.
    #[arg(long, env = ENV_REQUEST_TIMEOUT, value_parser = humantime_serde::re::humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Emit JSON log records.
    #[arg(long)]
    json_logs: bool,

    /// Append log records to this file as well as stderr.
    #[arg(long, env = ENV_LOG_FILE)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(base_url) = self.base_url {
            config.mealie.base_url = base_url;
        }
        if let Some(api_key) = self.api_key {
            config.mealie.api_key = api_key;
        }
        if let Some(timeout) = self.timeout {
            config.mealie.request_timeout = timeout;
        }
        if self.json_logs {
            config.observability.json_logs = true;
        }
        if let Some(log_file) = self.log_file {
            config.observability.log_file = Some(log_file);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env();
    Args::parse().apply(&mut config);

    mealie_mcp::observability::init_tracing(&config.observability);

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let client = match MealieClient::new(&config.mealie) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to initialize Mealie client: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = client.check_connection().await {
        tracing::error!("Failed to connect to Mealie at {}: {}", client.base_url(), e);
        return Err(e.into());
    }
    tracing::info!("Connected to Mealie at {}", client.base_url());

    let tools = ToolRegistry::new(Arc::new(client))?;
    let server = Arc::new(McpServer::new(McpRouter::new(config.server.clone(), tools)));

    let signal_server = Arc::clone(&server);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received");
            signal_server.shutdown();
        }
    });

    tracing::info!("Starting Mealie MCP server '{}'", config.server.name);
    server.serve_stdio().await?;
    tracing::info!("Mealie MCP server stopped");

    Ok(())
}
