//! Contact endpoints

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{ContactInput, ContactResponse, ValidationError};

/// POST /contacts request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub phone: String,
    pub email: String,
    pub client_id: String,
}

/// POST /contacts - attach a contact to an existing client
#[instrument(skip(state, req), fields(client_id = %req.client_id))]
async fn create_contact(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let client_id = req.client_id.trim();
    if client_id.is_empty() {
        return Err(ValidationError::Empty { field: "clientId" }.into());
    }

    let input = ContactInput::new(&req.phone, &req.email)?;
    let contact = state.contacts.create_contact(input, client_id).await?;

    tracing::info!(contact_id = %contact.id, "contact created");

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Contact routes
pub fn router() -> Router<AppState> {
    Router::new().route("/contacts", post(create_contact))
}
