//! HTTP request handlers for API endpoints.

pub mod health;
pub mod users;

pub use health::health_handler;
pub use users::{
    create_user_handler, get_user_by_cin_and_release_date_handler, lookup_without_cin_handler,
};
