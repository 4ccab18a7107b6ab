//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing and per-request timeout
//! - Graceful shutdown
//! - Status-only error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
