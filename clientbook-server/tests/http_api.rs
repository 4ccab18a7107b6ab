//! End-to-end HTTP tests over in-memory repositories

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use clientbook_server::db::repos::{ClientRepository, ContactRepository, DbError, MemoryStore};
use clientbook_server::models::{Client, ClientName, Contact, NewContact};
use clientbook_server::{build_router, AppState, ServerConfig};

fn app(store: &MemoryStore) -> Router {
    let state = AppState::from_repos(store.clone(), store.clone());
    build_router(state, &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response is not JSON")
}

const GABRIEL: &str =
    r#"{"name":"Gabriel","contacts":[{"phone":"+5521999999999","email":"gabriel@gmail.com"}]}"#;

#[tokio::test]
async fn create_client_returns_201_with_contacts() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, body) = send(&app, "POST", "/clients", Some(GABRIEL)).await;
    assert_eq!(status, StatusCode::CREATED);

    let body = json_of(&body);
    assert_eq!(body["name"], "Gabriel");
    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert!(body["createdAt"].is_string());

    let contacts = body["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["phone"], "+5521999999999");
    assert_eq!(contacts[0]["clientId"], id);
    assert!(!contacts[0]["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn create_client_without_contacts_has_empty_list() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, body) = send(&app, "POST", "/clients", Some(r#"{"name":"Solo"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_of(&body)["contacts"], json!([]));
}

#[tokio::test]
async fn invalid_json_is_400_with_empty_body() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, body) = send(&app, "POST", "/clients", Some("invalid-json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(store.client_count(), 0);
}

#[tokio::test]
async fn missing_name_is_400() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (status, _) = send(&app, "POST", "/clients", Some(r#"{"contacts":[]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_phone_is_400_and_nothing_written() {
    let store = MemoryStore::new();
    let app = app(&store);

    let payload = r#"{"name":"Gabriel","contacts":[{"phone":"21999999999","email":"gabriel@gmail.com"}]}"#;
    let (status, _) = send(&app, "POST", "/clients", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.client_count(), 0);
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let store = MemoryStore::new();
    let app = app(&store);

    let request = Request::builder()
        .method("POST")
        .uri("/clients")
        .body(Body::from(r#"{"name":"Plain"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn created_client_round_trips_through_list() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (_, created) = send(&app, "POST", "/clients", Some(GABRIEL)).await;
    let created = json_of(&created);

    let (status, body) = send(&app, "GET", "/clients", None).await;
    assert_eq!(status, StatusCode::OK);

    let clients = json_of(&body);
    let clients = clients.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["id"], created["id"]);
    assert_eq!(clients[0]["name"], "Gabriel");
    assert_eq!(clients[0]["contacts"][0]["phone"], "+5521999999999");
    assert_eq!(clients[0]["contacts"][0]["email"], "gabriel@gmail.com");
}

#[tokio::test]
async fn empty_list_is_200() {
    let store = MemoryStore::new();
    let (status, body) = send(&app(&store), "GET", "/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn client_contacts_for_missing_client_is_404() {
    let store = MemoryStore::new();
    let (status, body) = send(&app(&store), "GET", "/clients/missing-client/contacts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn blank_client_id_is_400() {
    let store = MemoryStore::new();
    let (status, _) = send(&app(&store), "GET", "/clients/%20/contacts", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lists_contacts_of_client() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (_, created) = send(&app, "POST", "/clients", Some(GABRIEL)).await;
    let id = json_of(&created)["id"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, "GET", &format!("/clients/{id}/contacts"), None).await;
    assert_eq!(status, StatusCode::OK);

    let contacts = json_of(&body);
    assert_eq!(contacts.as_array().unwrap().len(), 1);
    assert_eq!(contacts[0]["email"], "gabriel@gmail.com");
}

#[tokio::test]
async fn get_single_client() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (_, created) = send(&app, "POST", "/clients", Some(GABRIEL)).await;
    let id = json_of(&created)["id"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, "GET", &format!("/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["contacts"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/clients/missing-client", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_contact_for_existing_client() {
    let store = MemoryStore::new();
    let app = app(&store);

    let (_, created) = send(&app, "POST", "/clients", Some(r#"{"name":"Gabriel"}"#)).await;
    let id = json_of(&created)["id"].as_str().unwrap().to_owned();

    let payload = json!({"phone": "+5521999999999", "email": "test@example.com", "clientId": id});
    let (status, body) = send(&app, "POST", "/contacts", Some(&payload.to_string())).await;
    assert_eq!(status, StatusCode::CREATED);

    let contact = json_of(&body);
    assert_eq!(contact["clientId"], id.as_str());
    assert_eq!(contact["email"], "test@example.com");
    assert_eq!(store.contact_count(), 1);
}

#[tokio::test]
async fn create_contact_for_missing_client_is_404_and_not_persisted() {
    let store = MemoryStore::new();
    let app = app(&store);

    let payload = r#"{"phone":"+5521999999999","email":"test@example.com","clientId":"missing-client"}"#;
    let (status, body) = send(&app, "POST", "/contacts", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    assert_eq!(store.contact_count(), 0);
}

#[tokio::test]
async fn create_contact_with_malformed_body_is_400() {
    let store = MemoryStore::new();
    let (status, _) = send(&app(&store), "POST", "/contacts", Some("{\"phone\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_ok() {
    let store = MemoryStore::new();
    let (status, body) = send(&app(&store), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["status"], "ok");
}

/// Repositories whose every call fails
#[derive(Clone)]
struct Unavailable;

fn unavailable() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ClientRepository for Unavailable {
    async fn create_client(&self, _: &ClientName) -> Result<Client, DbError> {
        Err(unavailable())
    }
    async fn get_clients_with_contacts(&self) -> Result<Vec<Client>, DbError> {
        Err(unavailable())
    }
    async fn get_client_with_contacts_by_id(&self, _: &str) -> Result<Option<Client>, DbError> {
        Err(unavailable())
    }
    async fn get_client_by_id(&self, _: &str) -> Result<Option<Client>, DbError> {
        Err(unavailable())
    }
}

#[async_trait]
impl ContactRepository for Unavailable {
    async fn create_contact(&self, _: &NewContact) -> Result<Contact, DbError> {
        Err(unavailable())
    }
    async fn create_contacts(&self, _: &[NewContact]) -> Result<Vec<Contact>, DbError> {
        Err(unavailable())
    }
    async fn get_contacts_by_client_id(&self, _: &str) -> Result<Vec<Contact>, DbError> {
        Err(unavailable())
    }
}

#[tokio::test]
async fn storage_failures_are_500_with_empty_body() {
    let app = build_router(
        AppState::from_repos(Unavailable, Unavailable),
        &ServerConfig::default(),
    );

    let (status, body) = send(&app, "POST", "/clients", Some(GABRIEL)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());

    let (status, _) = send(&app, "GET", "/clients", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, "GET", "/clients/any/contacts", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let payload = r#"{"phone":"+5521999999999","email":"test@example.com","clientId":"any"}"#;
    let (status, _) = send(&app, "POST", "/contacts", Some(payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

/// Delegates to a `MemoryStore` but stalls on the list query
#[derive(Clone, Default)]
struct Sluggish(MemoryStore);

#[async_trait]
impl ClientRepository for Sluggish {
    async fn create_client(&self, name: &ClientName) -> Result<Client, DbError> {
        self.0.create_client(name).await
    }
    async fn get_clients_with_contacts(&self) -> Result<Vec<Client>, DbError> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        self.0.get_clients_with_contacts().await
    }
    async fn get_client_with_contacts_by_id(&self, id: &str) -> Result<Option<Client>, DbError> {
        self.0.get_client_with_contacts_by_id(id).await
    }
    async fn get_client_by_id(&self, id: &str) -> Result<Option<Client>, DbError> {
        self.0.get_client_by_id(id).await
    }
}

#[tokio::test]
async fn slow_requests_hit_the_deadline() {
    let store = Sluggish::default();
    let config = ServerConfig {
        request_timeout: Duration::from_millis(50),
        ..ServerConfig::default()
    };
    let app = build_router(AppState::from_repos(store.clone(), store.0.clone()), &config);

    let (status, _) = send(&app, "GET", "/clients", None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    let (status, _) = send(&app, "POST", "/clients", Some(GABRIEL)).await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn allowed_origin(app: &Router, origin: &str) -> Option<String> {
    let request = Request::builder()
        .uri("/health")
        .header("origin", origin)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    response
        .headers()
        .get("access-control-allow-origin")
        .map(|v| v.to_str().unwrap().to_owned())
}

#[tokio::test]
async fn cors_defaults_to_localhost_origins() {
    let app = app(&MemoryStore::new());

    assert_eq!(
        allowed_origin(&app, "http://localhost:8080").await.as_deref(),
        Some("http://localhost:8080")
    );
    assert_eq!(
        allowed_origin(&app, "http://127.0.0.1:8080").await.as_deref(),
        Some("http://127.0.0.1:8080")
    );
    assert_eq!(allowed_origin(&app, "https://elsewhere.example").await, None);
}

#[tokio::test]
async fn permissive_cors_allows_any_origin() {
    let store = MemoryStore::new();
    let config = ServerConfig {
        cors_permissive: true,
        ..ServerConfig::default()
    };
    let app = build_router(AppState::from_repos(store.clone(), store), &config);

    assert_eq!(
        allowed_origin(&app, "https://elsewhere.example").await.as_deref(),
        Some("*")
    );
}
