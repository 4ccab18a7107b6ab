//! Custom Axum extractors
//!
//! Both reject with `ApiError` so that bad input yields an empty 400
//! instead of axum's default plain-text rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON request body. Content-Type is not checked; the bytes must parse.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody {
                reason: e.body_text(),
            })?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::MalformedBody {
                reason: e.to_string(),
            })
    }
}

/// Extract a non-empty `clientId` path segment
pub struct ClientIdPath(pub String);

impl<S> FromRequestParts<S> for ClientIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingParam { name: "clientId" })?;

        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::MissingParam { name: "clientId" });
        }

        Ok(Self(id.to_owned()))
    }
}
