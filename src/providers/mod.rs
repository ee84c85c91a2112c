//! Providers Module - External Services
//!
//! HTTP plumbing for the deployed MCP server. Everything the UI knows
//! about the remote side lives behind `McpClient`.

pub mod mcp;

pub use mcp::*;
