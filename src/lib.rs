//! MCP Query Tool Library
//!
//! Local web UI for retrieving relevant transcript chunks from a deployed
//! MCP server:
//! - Query form served at `/`, results rendered as cards with the query
//!   terms highlighted
//! - MCP tool calls (`get_relevant_chunks`) over streamable HTTP with
//!   placeholder fallback when the server is unreachable
//! - Health and stats endpoints for monitoring

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use models::config::AppConfig;
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{McpHealth, QueryForm, RetrievedChunk};
pub use providers::mcp::McpClient;
pub use utils::stats::{StatsCollector, StatsSnapshot};
