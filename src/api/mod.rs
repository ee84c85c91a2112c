//! API Module - Local HTTP Surface
//!
//! The query page, its form handler, and the JSON health/stats endpoints.

pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::*;
