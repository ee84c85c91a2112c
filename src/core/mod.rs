//! Core Module - Query Processing
//!
//! Text-side logic that is independent of the web surface: extracting
//! meaningful words from a query and marking them up in retrieved content.

pub mod highlight;

pub use highlight::*;
