//! In-memory repositories for tests and local experiments
//!
//! One `MemoryStore` implements both repository traits over shared state,
//! so a clone handed to each service sees the same rows. The contact
//! foreign key is checked on write, as the database would.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::contacts::stamp;
use super::{new_id, now, ClientRepository, ContactRepository, DbError};
use crate::models::{Client, ClientName, Contact, NewContact};

#[derive(Default)]
struct Tables {
    /// Stored without contacts; joins are rebuilt on read
    clients: Vec<Client>,
    contacts: Vec<Contact>,
}

impl Tables {
    fn with_contacts(&self, client: &Client) -> Client {
        let mut client = client.clone();
        client.contacts = self.contacts_of(&client.id);
        client
    }

    fn contacts_of(&self, client_id: &str) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|c| c.client_id == client_id)
            .cloned()
            .collect()
    }

    fn has_client(&self, id: &str) -> bool {
        self.clients.iter().any(|c| c.id == id)
    }
}

/// Shared in-memory client and contact tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored contacts across all clients.
    pub fn contact_count(&self) -> usize {
        self.lock().contacts.len()
    }

    /// Number of stored clients.
    pub fn client_count(&self) -> usize {
        self.lock().clients.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means another test thread panicked mid-write
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create_client(&self, name: &ClientName) -> Result<Client, DbError> {
        let client = Client {
            id: new_id(),
            name: name.as_str().to_owned(),
            created_at: now(),
            updated_at: None,
            contacts: Vec::new(),
        };
        self.lock().clients.push(client.clone());
        Ok(client)
    }

    async fn get_clients_with_contacts(&self) -> Result<Vec<Client>, DbError> {
        let tables = self.lock();
        Ok(tables.clients.iter().map(|c| tables.with_contacts(c)).collect())
    }

    async fn get_client_with_contacts_by_id(&self, id: &str) -> Result<Option<Client>, DbError> {
        let tables = self.lock();
        Ok(tables
            .clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| tables.with_contacts(c)))
    }

    async fn get_client_by_id(&self, id: &str) -> Result<Option<Client>, DbError> {
        Ok(self.lock().clients.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, DbError> {
        let mut tables = self.lock();
        if !tables.has_client(&contact.client_id) {
            return Err(DbError::ForeignKey {
                client_id: contact.client_id.clone(),
            });
        }

        let contact = stamp(contact);
        tables.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn create_contacts(&self, contacts: &[NewContact]) -> Result<Vec<Contact>, DbError> {
        let mut tables = self.lock();

        // All-or-nothing, like the single multi-row INSERT
        if let Some(orphan) = contacts.iter().find(|c| !tables.has_client(&c.client_id)) {
            return Err(DbError::ForeignKey {
                client_id: orphan.client_id.clone(),
            });
        }

        let stamped: Vec<Contact> = contacts.iter().map(stamp).collect();
        tables.contacts.extend(stamped.iter().cloned());
        Ok(stamped)
    }

    async fn get_contacts_by_client_id(&self, client_id: &str) -> Result<Vec<Contact>, DbError> {
        Ok(self.lock().contacts_of(client_id))
    }
}
