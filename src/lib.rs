//! ClickUp MCP Server Library
//!
//! This crate provides an MCP (Model Context Protocol) server for the ClickUp
//! API. Tools and resources cover workspaces, spaces, folders, lists, tasks and
//! docs; it can be served over HTTP, over stdio, or embedded as a library.
//!
//! # Features
//!
//! - **Thin pass-through**: every tool maps to one API call and returns the raw JSON
//! - **Per-request keys**: an `X-ClickUp-API-Key` header overrides the configured key
//! - **Closed-task reports**: date-range task collection in a fixed UTC+8 calendar
//!
//! # Example
//!
//! ```rust,no_run
//! use clickupmcp::{ClickUpServer, KeyResolver};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), clickupmcp::Error> {
//! let server = ClickUpServer::new(KeyResolver::from_env())?;
//!
//! let ct = CancellationToken::new();
//! let bind = std::net::SocketAddr::from(([127, 0, 0, 1], 8787));
//! clickupmcp::transport::serve(bind, server, ct).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod request;
pub mod server;
pub mod time;
pub mod transport;
pub mod types;

// Re-export main types at crate root
pub use auth::KeyResolver;
pub use client::ClickUpClient;
pub use error::Error;
pub use request::ApiRequest;
pub use server::ClickUpServer;

// Re-export commonly used types
pub use types::{ApiFailure, ApiResponse, WeekTask};
