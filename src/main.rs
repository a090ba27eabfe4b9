//! MCP server for ClickUp API integration.
//!
//! This binary exposes ClickUp operations as MCP tools and resources for AI
//! assistants.
//!
//! # Usage
//!
//! ```bash
//! export CLICKUP_API_KEY="pk_..."
//! clickupmcp                      # HTTP on 127.0.0.1:8787 (/sse and /mcp)
//! clickupmcp --bind 0.0.0.0:9000  # another address
//! clickupmcp --stdio              # one session over stdin/stdout
//! clickupmcp --list-tools task    # print matching tool schemas
//! ```
//!
//! Over HTTP each request may carry its own key in `X-ClickUp-API-Key`.

mod schema;

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use clickupmcp::{ClickUpServer, KeyResolver};
use rmcp::{transport::stdio, ServiceExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_SHA"),
    env!("BUILD_GIT_DIRTY"),
    " ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "clickupmcp", version = VERSION, about = "MCP server for the ClickUp API")]
struct Cli {
    /// Fallback ClickUp API key, used when a request carries none
    #[arg(long, env = "CLICKUP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Address for the HTTP transports
    #[arg(long, env = "CLICKUP_MCP_BIND", default_value = "127.0.0.1:8787")]
    bind: SocketAddr,

    /// Serve a single session over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Print tool schemas (optionally filtered by name) and exit
    #[arg(long, value_name = "FILTER", num_args = 0..=1, default_missing_value = "")]
    list_tools: Option<String>,
}

/// Initialize tracing with an env filter. Logs go to stderr so stdout stays
/// free for the stdio transport.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clickupmcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(filter) = cli.list_tools.as_deref() {
        let filter = Some(filter).filter(|f| !f.is_empty());
        let matched = schema::dump_schemas(filter)?;
        return Ok(if matched {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    init_tracing();

    let keys = KeyResolver::new(cli.api_key);
    if !keys.has_fallback() {
        warn!("No CLICKUP_API_KEY configured; requests must send X-ClickUp-API-Key");
    }
    let server = ClickUpServer::new(keys)?;

    if cli.stdio {
        info!(version = VERSION, "Serving over stdio");
        let service = server.serve(stdio()).await?;
        service.waiting().await?;
        return Ok(ExitCode::SUCCESS);
    }

    let ct = CancellationToken::new();
    let shutdown = ct.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
        }
        shutdown.cancel();
    });

    info!(version = VERSION, "Starting HTTP server");
    clickupmcp::transport::serve(cli.bind, server, ct).await?;
    Ok(ExitCode::SUCCESS)
}
