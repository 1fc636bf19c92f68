//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UserService;

/// State shared by all request handlers.
///
/// Built once at startup by [`crate::server::run`]; cloning only bumps the
/// reference count.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }
}
