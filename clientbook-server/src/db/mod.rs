//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool with explicit limits - no Arc<Mutex<Connection>>
//! - List operations use JOINs - no N+1 queries
//! - Ids and timestamps are assigned by the repository, never by callers

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, ConnectionParts, DatabaseConfig, DatabaseUrl};
pub use repos::*;
