//! API error types with IntoResponse
//!
//! Errors become status-only responses. Internal failures are logged with
//! their full cause chain; nothing of it reaches the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::ValidationError;
use crate::services::ServiceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body is not valid JSON for the expected payload (400)
    MalformedBody { reason: String },

    /// Required path parameter missing or empty (400)
    MissingParam { name: &'static str },

    /// Payload field failed validation (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody { .. } | Self::MissingParam { .. } | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::MalformedBody { reason } => {
                tracing::warn!(reason = %reason, "malformed request body");
            }
            Self::MissingParam { name } => {
                tracing::warn!(param = name, "missing path parameter");
            }
            Self::Validation(e) => {
                tracing::warn!(error = %e, "payload validation failed");
            }
            Self::NotFound { resource, id } => {
                tracing::info!(resource = resource, id = %id, "not found");
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
            }
        }

        self.status().into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::ClientNotFound(id) => Self::NotFound {
                resource: "client",
                id,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
