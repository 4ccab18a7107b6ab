//! Client entity, validated name, and response shape

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::contact::{Contact, ContactResponse};
use super::ValidationError;

/// Maximum length for client names
const MAX_CLIENT_NAME_LEN: usize = 255;

/// Validated client name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientName(String);

impl ClientName {
    /// Create a new client name.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    ///
    /// # Example
    /// ```
    /// use clientbook_server::models::ClientName;
    ///
    /// assert!(ClientName::new("Gabriel").is_ok());
    /// assert!(ClientName::new("").is_err());
    /// assert!(ClientName::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.chars().count() > MAX_CLIENT_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_CLIENT_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Client record as stored
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Owned contacts; empty unless the query loaded them
    pub contacts: Vec<Contact>,
}

/// Client as returned over HTTP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub contacts: Vec<ContactResponse>,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            contacts: c.contacts.into_iter().map(ContactResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = ClientName::new("  Gabriel  ").unwrap();
        assert_eq!(name.as_str(), "Gabriel");
    }

    #[test]
    fn rejects_empty() {
        let err = ClientName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn max_length() {
        assert!(ClientName::new(&"a".repeat(255)).is_ok());

        let err = ClientName::new(&"a".repeat(256)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn length_counts_characters() {
        // 255 two-byte characters still fit
        assert!(ClientName::new(&"é".repeat(255)).is_ok());
    }

    #[test]
    fn response_uses_camel_case() {
        let client = Client {
            id: "client-1".into(),
            name: "Gabriel".into(),
            created_at: Utc::now(),
            updated_at: None,
            contacts: vec![],
        };

        let json = serde_json::to_value(ClientResponse::from(client)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["contacts"], serde_json::json!([]));
    }
}
