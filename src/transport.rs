//! HTTP transports.
//!
//! `/sse` serves the streamable HTTP protocol with sessions and a per-session
//! event stream; `/mcp` serves the same tools statelessly, one JSON-RPC
//! request per POST. Any other path is a plain 404.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::Router;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::server::ClickUpServer;
use crate::Error;

/// Path of the session-based streaming endpoint.
pub const SSE_PATH: &str = "/sse";
/// Path of the stateless request/response endpoint.
pub const MCP_PATH: &str = "/mcp";

/// Create the streamable HTTP service for one endpoint.
///
/// Every session (or, statelessly, every request) gets its own clone of
/// `server`; clones share the HTTP client and fallback key.
pub fn mcp_service(
    server: ClickUpServer,
    stateful_mode: bool,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<ClickUpServer> {
    let service_factory = move || -> Result<ClickUpServer, std::io::Error> { Ok(server.clone()) };

    let config = StreamableHttpServerConfig {
        stateful_mode,
        cancellation_token,
        ..Default::default()
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Build the router serving both endpoints.
pub fn router(server: ClickUpServer, cancellation_token: CancellationToken) -> Router {
    Router::new()
        .nest_service(
            SSE_PATH,
            mcp_service(server.clone(), true, cancellation_token.child_token()),
        )
        .nest_service(
            MCP_PATH,
            mcp_service(server, false, cancellation_token.child_token()),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

/// Serve both endpoints on `bind` until `cancellation_token` fires.
pub async fn serve(
    bind: SocketAddr,
    server: ClickUpServer,
    cancellation_token: CancellationToken,
) -> Result<(), Error> {
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;
    info!("ClickUp MCP server listening on http://{}", addr);
    info!("Streaming endpoint: http://{}{}", addr, SSE_PATH);
    info!("Request/response endpoint: http://{}{}", addr, MCP_PATH);

    let app = router(server, cancellation_token.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancellation_token.cancelled_owned().await })
        .await?;

    info!("Server stopped");
    Ok(())
}
