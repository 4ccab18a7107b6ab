//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod client;
pub mod contact;

pub use validation::ValidationError;
pub use client::{Client, ClientName, ClientResponse};
pub use contact::{Contact, ContactInput, ContactResponse, Email, NewContact, Phone};
