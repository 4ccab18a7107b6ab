//! Route handlers organized by resource

pub mod clients;
pub mod contacts;
pub mod health;
