//! Contact entity, phone/email validation, and response shape

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for email addresses (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

/// E.164: leading '+', up to 15 digits, no leading zero
static E164_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$").expect("invalid e164 regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("invalid email regex")
});

/// Validated phone number in E.164 format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    /// Create a phone number, validating E.164 format.
    ///
    /// # Example
    /// ```
    /// use clientbook_server::models::Phone;
    ///
    /// assert!(Phone::new("+5521999999999").is_ok());
    /// assert!(Phone::new("21999999999").is_err());  // missing '+'
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "phone" });
        }

        if !E164_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "phone",
                reason: "must be E.164 formatted, e.g. +5521999999999",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Create an email address, validating `local@domain.tld` syntax.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be a valid email address",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone/email pair not yet bound to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInput {
    pub phone: Phone,
    pub email: Email,
}

impl ContactInput {
    pub fn new(phone: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            phone: Phone::new(phone)?,
            email: Email::new(email)?,
        })
    }

    /// Bind this contact to its owning client.
    pub fn for_client(self, client_id: impl Into<String>) -> NewContact {
        NewContact {
            client_id: client_id.into(),
            phone: self.phone,
            email: self.email,
        }
    }
}

/// Contact ready to be written; the client reference is already set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub client_id: String,
    pub phone: Phone,
    pub email: Email,
}

/// Contact record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Contact {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Contact as returned over HTTP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            phone: c.phone,
            email: c.email,
            client_id: c.client_id,
            created_at: c.created_at,
        }
    }
}
