//! Client endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::{ClientIdPath, JsonBody};
use crate::http::server::AppState;
use crate::models::{ClientName, ClientResponse, ContactInput, ContactResponse};

/// Contact entry inside a create-client request
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub phone: String,
    pub email: String,
}

/// POST /clients request body
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<ContactPayload>,
}

impl CreateClientRequest {
    fn into_parts(self) -> Result<(ClientName, Vec<ContactInput>), ApiError> {
        let name = ClientName::new(&self.name)?;
        let contacts = self
            .contacts
            .iter()
            .map(|c| ContactInput::new(&c.phone, &c.email))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((name, contacts))
    }
}

/// POST /clients - create a client with its contacts
#[instrument(skip(state, req), fields(contacts = req.contacts.len()))]
async fn create_client(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let (name, contacts) = req.into_parts()?;
    let client = state.clients.create_client(name, contacts).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /clients - list all clients with their contacts
#[instrument(skip(state))]
async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let clients = state.clients.get_clients_with_contacts().await?;
    Ok(Json(clients))
}

/// GET /clients/{clientId} - one client with its contacts
#[instrument(skip(state), fields(client_id = %id))]
async fn get_client(
    State(state): State<AppState>,
    ClientIdPath(id): ClientIdPath,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = state.clients.get_client_by_id(&id).await?;
    Ok(Json(client))
}

/// GET /clients/{clientId}/contacts - contacts of one client
#[instrument(skip(state), fields(client_id = %id))]
async fn list_client_contacts(
    State(state): State<AppState>,
    ClientIdPath(id): ClientIdPath,
) -> Result<Json<Vec<ContactResponse>>, ApiError> {
    let contacts = state.clients.get_client_contacts_by_id(&id).await?;
    Ok(Json(contacts))
}

/// Client routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/{client_id}", get(get_client))
        .route("/clients/{client_id}/contacts", get(list_client_contacts))
}
