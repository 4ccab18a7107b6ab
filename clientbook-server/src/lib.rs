//! clientbook-server: HTTP service for clients and their contacts
//!
//! Layering is handler → service → repository → database:
//! - [`http`] decodes requests and maps outcomes to status codes
//! - [`services`] enforce that contacts reference an existing client
//! - [`db`] owns the pool, migrations and SQL

pub mod db;
pub mod http;
pub mod models;
pub mod services;

pub use db::{create_pool, DatabaseConfig, DatabaseUrl};
pub use http::{build_router, run_server, AppState, ServerConfig};
