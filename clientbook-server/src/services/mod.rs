//! Service layer - business rules between handlers and repositories
//!
//! Services are generic over the repository traits and return response
//! shapes. Repository failures are wrapped with the operation that failed;
//! `ClientNotFound` passes through untouched so handlers can match on it.

pub mod clients;
pub mod contacts;

pub use clients::{ClientService, ClientServiceImpl};
pub use contacts::{ContactService, ContactServiceImpl};

use crate::db::repos::DbError;

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced client id does not exist
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// Downstream persistence failure, prefixed with the failed operation
    #[error("{context}: {source}")]
    Repository {
        context: String,
        #[source]
        source: DbError,
    },
}

impl ServiceError {
    /// Wrap a repository error with the operation that produced it.
    pub fn repository(context: impl Into<String>) -> impl FnOnce(DbError) -> Self {
        let context = context.into();
        move |source| Self::Repository { context, source }
    }
}
