//! Client use-case service
//!
//! # Invariants
//! - A client is written before its contacts; contacts receive its id.
//! - Creation is not transactional: if the contact batch fails, the client
//!   row stays and the error is returned.

use async_trait::async_trait;

use super::ServiceError;
use crate::db::repos::{ClientRepository, ContactRepository};
use crate::models::{ClientName, ClientResponse, ContactInput, ContactResponse, NewContact};

/// Client operations exposed to handlers
#[async_trait]
pub trait ClientService: Send + Sync {
    /// Create a client together with zero or more contacts.
    async fn create_client(
        &self,
        name: ClientName,
        contacts: Vec<ContactInput>,
    ) -> Result<ClientResponse, ServiceError>;

    /// All clients with their contacts.
    async fn get_clients_with_contacts(&self) -> Result<Vec<ClientResponse>, ServiceError>;

    /// One client with its contacts.
    async fn get_client_by_id(&self, id: &str) -> Result<ClientResponse, ServiceError>;

    /// Contacts of one client.
    async fn get_client_contacts_by_id(
        &self,
        id: &str,
    ) -> Result<Vec<ContactResponse>, ServiceError>;
}

/// Repository-backed client service
pub struct ClientServiceImpl<C, K> {
    clients: C,
    contacts: K,
}

impl<C, K> ClientServiceImpl<C, K>
where
    C: ClientRepository,
    K: ContactRepository,
{
    pub fn new(clients: C, contacts: K) -> Self {
        Self { clients, contacts }
    }
}

#[async_trait]
impl<C, K> ClientService for ClientServiceImpl<C, K>
where
    C: ClientRepository,
    K: ContactRepository,
{
    async fn create_client(
        &self,
        name: ClientName,
        contacts: Vec<ContactInput>,
    ) -> Result<ClientResponse, ServiceError> {
        let mut client = self
            .clients
            .create_client(&name)
            .await
            .map_err(ServiceError::repository("create client"))?;

        if !contacts.is_empty() {
            let drafts: Vec<NewContact> = contacts
                .into_iter()
                .map(|c| c.for_client(client.id.as_str()))
                .collect();

            client.contacts = self.contacts.create_contacts(&drafts).await.map_err(|e| {
                tracing::warn!(
                    client_id = %client.id,
                    error = %e,
                    "client committed but its contacts were not"
                );
                ServiceError::repository("create contacts")(e)
            })?;
        }

        tracing::info!(
            client_id = %client.id,
            contacts = client.contacts.len(),
            "client created"
        );

        Ok(ClientResponse::from(client))
    }

    async fn get_clients_with_contacts(&self) -> Result<Vec<ClientResponse>, ServiceError> {
        let clients = self
            .clients
            .get_clients_with_contacts()
            .await
            .map_err(ServiceError::repository("get clients with contacts"))?;

        Ok(clients.into_iter().map(ClientResponse::from).collect())
    }

    async fn get_client_by_id(&self, id: &str) -> Result<ClientResponse, ServiceError> {
        self.clients
            .get_client_with_contacts_by_id(id)
            .await
            .map_err(ServiceError::repository(format!("get client by id {id}")))?
            .map(ClientResponse::from)
            .ok_or_else(|| ServiceError::ClientNotFound(id.to_owned()))
    }

    async fn get_client_contacts_by_id(
        &self,
        id: &str,
    ) -> Result<Vec<ContactResponse>, ServiceError> {
        let client = self
            .clients
            .get_client_by_id(id)
            .await
            .map_err(ServiceError::repository(format!("get client by id {id}")))?
            .ok_or_else(|| ServiceError::ClientNotFound(id.to_owned()))?;

        let contacts = self
            .contacts
            .get_contacts_by_client_id(&client.id)
            .await
            .map_err(ServiceError::repository(format!(
                "get contacts by client id {}",
                client.id
            )))?;

        Ok(contacts.into_iter().map(ContactResponse::from).collect())
    }
}
