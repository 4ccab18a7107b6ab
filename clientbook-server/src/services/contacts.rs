//! Contact use-case service
//!
//! The referenced client is looked up before any write; a missing client
//! fails with `ClientNotFound` and nothing is persisted.

use async_trait::async_trait;

use super::ServiceError;
use crate::db::repos::{ClientRepository, ContactRepository};
use crate::models::{ContactInput, ContactResponse};

/// Contact operations exposed to handlers
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Attach a new contact to an existing client.
    async fn create_contact(
        &self,
        contact: ContactInput,
        client_id: &str,
    ) -> Result<ContactResponse, ServiceError>;
}

/// Repository-backed contact service
pub struct ContactServiceImpl<C, K> {
    clients: C,
    contacts: K,
}

impl<C, K> ContactServiceImpl<C, K>
where
    C: ClientRepository,
    K: ContactRepository,
{
    pub fn new(clients: C, contacts: K) -> Self {
        Self { clients, contacts }
    }
}

#[async_trait]
impl<C, K> ContactService for ContactServiceImpl<C, K>
where
    C: ClientRepository,
    K: ContactRepository,
{
    async fn create_contact(
        &self,
        contact: ContactInput,
        client_id: &str,
    ) -> Result<ContactResponse, ServiceError> {
        let client = self
            .clients
            .get_client_by_id(client_id)
            .await
            .map_err(ServiceError::repository(format!("get client by id {client_id}")))?
            .ok_or_else(|| ServiceError::ClientNotFound(client_id.to_owned()))?;

        let contact = self
            .contacts
            .create_contact(&contact.for_client(client.id))
            .await
            .map_err(ServiceError::repository("create contact"))?;

        Ok(ContactResponse::from(contact))
    }
}
