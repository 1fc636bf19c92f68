//! Handlers for user registration and lookup.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::api::dto::user::{CreateUserRequest, ReleaseDateQuery, UserResponse};
use crate::domain::validation::{
    UserCandidate, ValidationError, parse_release_date_param, validate_lookup_cin,
};
use crate::error::AppError;
use crate::state::AppState;

/// Body returned when a lookup fails for an unexpected reason.
pub const LOOKUP_INTERNAL_MESSAGE: &str = "Error retrieving user.";

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /api/v1/users`
///
/// # Request
///
/// ```json
/// {
///   "name": "Integration User",
///   "cin": "12345678",
///   "cinReleaseDate": "2022-05-10",
///   "isMarried": true
/// }
/// ```
///
/// A missing, `null` or undecodable body is reported as
/// "User data cannot be null.". A field of the wrong JSON type (for example
/// `"cin": 12345678` as a number) makes the whole body undecodable and is
/// reported the same way.
///
/// # Errors
///
/// Returns 400 with the message of the first broken field rule.
/// Returns 409 if the CIN is already registered.
/// Returns 500 on storage errors.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<Option<CreateUserRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let candidate = match payload {
        Ok(Json(body)) => body.map(UserCandidate::from),
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "Could not decode user payload");
            None
        }
    };

    let requested_cin = candidate
        .as_ref()
        .and_then(|c| c.cin.clone())
        .unwrap_or_else(|| "null/not provided".to_string());
    tracing::info!(cin = %requested_cin, "Received request to create user");

    let user = state
        .user_service
        .register(candidate)
        .await
        .inspect_err(|e| match e {
            AppError::Validation(reason) => {
                tracing::warn!(cin = %requested_cin, %reason, "Validation failed for create user");
            }
            AppError::Conflict(message) => {
                tracing::warn!(cin = %requested_cin, %message, "Conflict while creating user");
            }
            _ => {}
        })?;

    tracing::info!(id = user.id, cin = %user.cin, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Retrieves a user by CIN and CIN release date.
///
/// # Endpoint
///
/// `GET /api/v1/users/cin/{cin}?releaseDate=YYYY-MM-DD`
///
/// The CIN and date are checked here, so malformed lookups never reach the
/// service. A path segment that cannot be decoded counts as a malformed CIN,
/// and a query string that cannot be decoded (such as a repeated
/// `releaseDate`) counts as a malformed date.
///
/// # Errors
///
/// Returns 400 if the CIN is not 8 digits or `releaseDate` is missing or not
/// an ISO date.
/// Returns 404 if no user matches.
/// Returns 500 on storage errors.
pub async fn get_user_by_cin_and_release_date_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ReleaseDateQuery>, QueryRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(cin) = path.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Could not decode CIN path segment");
        AppError::from(ValidationError::InvalidCinInPath)
    })?;
    let release_date_param = query.map(|Query(params)| params.release_date);

    tracing::info!(
        cin = %cin,
        release_date = ?release_date_param.as_ref().ok().and_then(|d| d.as_deref()),
        "Received request to get user by CIN and release date"
    );

    let cin = validate_lookup_cin(&cin).inspect_err(|_| {
        tracing::warn!(cin = %cin, "Invalid CIN format in URL path");
    })?;

    let release_date_param = release_date_param.map_err(|rejection| {
        tracing::warn!(cin, reason = %rejection.body_text(), "Could not decode lookup query");
        AppError::from(ValidationError::MalformedReleaseDateParam)
    })?;

    let release_date = parse_release_date_param(release_date_param.as_deref())
        .inspect_err(|e| tracing::warn!(cin, reason = %e, "Invalid releaseDate parameter"))?;

    let user = state
        .user_service
        .get_user_by_cin_and_release_date(cin, release_date)
        .await
        .inspect_err(|e| {
            if let AppError::NotFound(message) = e {
                tracing::warn!(cin, %release_date, %message, "User lookup found nothing");
            }
        })
        .map_err(|e| e.with_public_message(LOOKUP_INTERNAL_MESSAGE))?;

    Ok(Json(user.into()))
}

/// Lookup route hit without a CIN segment.
///
/// # Endpoint
///
/// `GET /api/v1/users/cin`
pub async fn lookup_without_cin_handler() -> AppError {
    tracing::warn!("User lookup requested without a CIN");
    ValidationError::InvalidCinInPath.into()
}
