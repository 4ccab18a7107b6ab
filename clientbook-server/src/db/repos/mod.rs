//! Repository traits and implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Assigns ids and UTC timestamps on create
//! - Returns `Ok(None)` for a missing row; `DbError` is for real failures

pub mod clients;
pub mod contacts;
pub mod memory;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

pub use clients::{ClientRepository, PgClientRepo};
pub use contacts::{ContactRepository, PgContactRepo};
pub use memory::MemoryStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("contact references unknown client '{client_id}'")]
    ForeignKey { client_id: String },
}

/// Fresh globally-unique identifier.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time at the precision PostgreSQL keeps (microseconds),
/// so a returned row matches what a later read produces.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
