//! API route configuration.

use crate::api::handlers::{
    create_user_handler, get_user_by_cin_and_release_date_handler, lookup_without_cin_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// User routes, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /users`            - Register a user
/// - `GET  /users/cin/{cin}`  - Look up a user by CIN and `releaseDate` query parameter
/// - `GET  /users/cin`        - Lookup without a CIN, always 400
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/cin", get(lookup_without_cin_handler))
        .route("/users/cin/{cin}", get(get_user_by_cin_and_release_date_handler))
}
