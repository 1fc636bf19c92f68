//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization. User payloads use camelCase
//! field names on the wire.

pub mod health;
pub mod user;
