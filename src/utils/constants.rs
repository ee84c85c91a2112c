//! Constants Module - Single Source of Truth
//!
//! All tunables and environment variable names used across the
//! application are defined here, not inline at their call sites.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name (shown in page title and MCP client info)
pub const APP_NAME: &str = "MCP Query Tool";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests to the MCP server
pub const USER_AGENT: &str = "mcp-query/0.1.0";

// ============================================
// ENVIRONMENT VARIABLES
// ============================================

/// Base URL of the deployed MCP server (required)
pub const ENV_SERVER_URL: &str = "BWAI_MCP_SERVER_URL";

/// Listen host override (default 127.0.0.1)
pub const ENV_UI_HOST: &str = "BWAI_UI_HOST";

/// Listen port override (default 5001); the platform-style PORT variable
/// takes precedence when both are set
pub const ENV_UI_PORT: &str = "BWAI_UI_PORT";

// ============================================
// SERVER CONSTANTS
// ============================================

/// Default listen port
pub const DEFAULT_PORT: u16 = 5001;

/// Default listen host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Timeout for requests to the MCP server (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Ceiling for a whole request to the local UI (seconds). Must exceed the
/// MCP timeout so a slow remote still gets fallback cards, not a 408.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================
// MCP CONSTANTS
// ============================================

/// Protocol revision advertised during the initialize handshake
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Remote tool that performs the chunk retrieval
pub const CHUNK_TOOL_NAME: &str = "get_relevant_chunks";

// ============================================
// QUERY CONSTANTS
// ============================================

/// Default number of chunks to retrieve
pub const DEFAULT_TOP_K: usize = 3;

/// Lower bound for top_k (matches the form's number input)
pub const MIN_TOP_K: usize = 1;

/// Upper bound for top_k (matches the form's number input)
pub const MAX_TOP_K: usize = 10;
