//! Core domain entities.
//!
//! The registry has a single entity, [`User`]. Creation goes through
//! [`NewUser`], which carries the validated fields but no identity yet.

pub mod user;

pub use user::{NewUser, User};
