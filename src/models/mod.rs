//! Models Module - Data Structures & Configuration
//!
//! Single source of truth for configuration, error types and the wire
//! shapes exchanged with the MCP server.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
