//! Contact repository
//!
//! - create: single INSERT with server-assigned id and timestamp
//! - create_contacts: one multi-row INSERT for the whole batch

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{new_id, now, DbError};
use crate::models::{Contact, NewContact};

/// Persistence operations for contacts
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persist one contact.
    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, DbError>;

    /// Persist a batch of contacts, each already bound to its client.
    async fn create_contacts(&self, contacts: &[NewContact]) -> Result<Vec<Contact>, DbError>;

    /// Contacts of one client, oldest first. Empty when there are none.
    async fn get_contacts_by_client_id(&self, client_id: &str) -> Result<Vec<Contact>, DbError>;
}

/// Assign id and timestamp to a contact about to be written.
pub(crate) fn stamp(contact: &NewContact) -> Contact {
    Contact {
        id: new_id(),
        phone: contact.phone.as_str().to_owned(),
        email: contact.email.as_str().to_owned(),
        client_id: contact.client_id.clone(),
        created_at: now(),
        updated_at: None,
    }
}

/// PostgreSQL-backed contact repository
#[derive(Clone)]
pub struct PgContactRepo {
    pool: PgPool,
}

impl PgContactRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepo {
    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, DbError> {
        let contact = stamp(contact);

        sqlx::query(
            r#"
            INSERT INTO contacts (id, phone, email, client_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&contact.id)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(&contact.client_id)
        .bind(contact.created_at)
        .execute(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn create_contacts(&self, contacts: &[NewContact]) -> Result<Vec<Contact>, DbError> {
        if contacts.is_empty() {
            return Ok(Vec::new());
        }

        let contacts: Vec<Contact> = contacts.iter().map(stamp).collect();

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO contacts (id, phone, email, client_id, created_at) ");
        builder.push_values(&contacts, |mut row, c| {
            row.push_bind(c.id.clone())
                .push_bind(c.phone.clone())
                .push_bind(c.email.clone())
                .push_bind(c.client_id.clone())
                .push_bind(c.created_at);
        });
        builder.build().execute(&self.pool).await?;

        Ok(contacts)
    }

    async fn get_contacts_by_client_id(&self, client_id: &str) -> Result<Vec<Contact>, DbError> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, phone, email, client_id, created_at, updated_at
            FROM contacts
            WHERE client_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }
}
