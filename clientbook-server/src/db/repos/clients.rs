//! Client repository
//!
//! - create: INSERT with server-assigned id and timestamp
//! - list/get with contacts: single LEFT JOIN, grouped in order (no N+1)

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{new_id, now, DbError};
use crate::models::{Client, ClientName, Contact};

/// Persistence operations for clients
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Persist a new client, returning it with its id and creation time.
    async fn create_client(&self, name: &ClientName) -> Result<Client, DbError>;

    /// All clients with their contacts, oldest first.
    async fn get_clients_with_contacts(&self) -> Result<Vec<Client>, DbError>;

    /// One client with its contacts, or `None` when absent.
    async fn get_client_with_contacts_by_id(&self, id: &str) -> Result<Option<Client>, DbError>;

    /// One client without contacts, or `None` when absent.
    async fn get_client_by_id(&self, id: &str) -> Result<Option<Client>, DbError>;
}

const CLIENT_WITH_CONTACTS_SQL: &str = r#"
    SELECT
        c.id, c.name, c.created_at, c.updated_at,
        ct.id AS contact_id,
        ct.phone AS contact_phone,
        ct.email AS contact_email,
        ct.created_at AS contact_created_at,
        ct.updated_at AS contact_updated_at
    FROM clients c
    LEFT JOIN contacts ct ON ct.client_id = c.id
"#;

const CLIENT_WITH_CONTACTS_ORDER: &str = "ORDER BY c.created_at, c.id, ct.created_at, ct.id";

/// PostgreSQL-backed client repository
#[derive(Clone)]
pub struct PgClientRepo {
    pool: PgPool,
}

impl PgClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepo {
    async fn create_client(&self, name: &ClientName) -> Result<Client, DbError> {
        let client = Client {
            id: new_id(),
            name: name.as_str().to_owned(),
            created_at: now(),
            updated_at: None,
            contacts: Vec::new(),
        };

        sqlx::query("INSERT INTO clients (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(&client.id)
            .bind(&client.name)
            .bind(client.created_at)
            .execute(&self.pool)
            .await?;

        Ok(client)
    }

    async fn get_clients_with_contacts(&self) -> Result<Vec<Client>, DbError> {
        let sql = format!("{CLIENT_WITH_CONTACTS_SQL} {CLIENT_WITH_CONTACTS_ORDER}");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(group_client_rows(rows)?)
    }

    async fn get_client_with_contacts_by_id(&self, id: &str) -> Result<Option<Client>, DbError> {
        let sql = format!("{CLIENT_WITH_CONTACTS_SQL} WHERE c.id = $1 {CLIENT_WITH_CONTACTS_ORDER}");
        let rows = sqlx::query(&sql).bind(id).fetch_all(&self.pool).await?;

        Ok(group_client_rows(rows)?.into_iter().next())
    }

    async fn get_client_by_id(&self, id: &str) -> Result<Option<Client>, DbError> {
        let row = sqlx::query("SELECT id, name, created_at, updated_at FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| client_from_row(&r)).transpose().map_err(DbError::from)
    }
}

fn client_from_row(row: &PgRow) -> Result<Client, sqlx::Error> {
    Ok(Client {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        contacts: Vec::new(),
    })
}

/// Fold joined rows into clients. Rows must be ordered by client so that
/// all rows of one client are adjacent.
fn group_client_rows(rows: Vec<PgRow>) -> Result<Vec<Client>, sqlx::Error> {
    let mut clients: Vec<Client> = Vec::new();

    for row in rows {
        let id: String = row.try_get("id")?;

        if clients.last().map(|c| c.id != id).unwrap_or(true) {
            clients.push(client_from_row(&row)?);
        }

        // LEFT JOIN: a client without contacts yields one row of NULLs
        let contact_id: Option<String> = row.try_get("contact_id")?;
        if let (Some(contact_id), Some(client)) = (contact_id, clients.last_mut()) {
            client.contacts.push(Contact {
                id: contact_id,
                phone: row.try_get("contact_phone")?,
                email: row.try_get("contact_email")?,
                client_id: id,
                created_at: row.try_get("contact_created_at")?,
                updated_at: row.try_get("contact_updated_at")?,
            });
        }
    }

    Ok(clients)
}
