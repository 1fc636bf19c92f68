#![allow(dead_code)]

use axum::Router;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;
use user_registry::application::services::UserService;
use user_registry::domain::clock::FixedClock;
use user_registry::domain::repositories::UserRepository;
use user_registry::infrastructure::persistence::InMemoryUserRepository;
use user_registry::routes::{app_router, router};
use user_registry::state::AppState;

/// Date the test clock reports as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn create_test_state(repository: Arc<dyn UserRepository>) -> AppState {
    let user_service = Arc::new(UserService::new(repository, Arc::new(FixedClock(today()))));
    AppState::new(user_service)
}

/// Test server over the full router, backed by an in-memory store.
///
/// The repository handle is returned so tests can inspect stored data.
pub fn make_server() -> (TestServer, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app: Router = router(create_test_state(repository.clone()));
    (TestServer::new(app).unwrap(), repository)
}

/// Test server over the production service, trailing-slash normalization
/// included.
pub fn make_normalized_server() -> TestServer {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = app_router(create_test_state(repository));
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

pub fn integration_user() -> Value {
    json!({
        "name": "Integration User",
        "cin": "12345678",
        "cinReleaseDate": "2022-05-10",
        "isMarried": true
    })
}
