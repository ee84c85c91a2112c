//! Utils Module - Shared Helpers
//!
//! Constants and the stats collector used across the application.

pub mod constants;
pub mod stats;

pub use constants::*;
pub use stats::*;
