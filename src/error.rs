//! Application error type and its HTTP mapping.
//!
//! Every failure a handler can report ends up as an [`AppError`]. The
//! [`IntoResponse`] implementation is the only place where errors become a
//! status code and a plain-text body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::validation::ValidationError;

/// Body returned for internal errors when no operation-specific text is set.
pub const GENERIC_INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Errors surfaced by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client input broke a field rule. Maps to `400 Bad Request`.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness rule was violated. Maps to `409 Conflict`.
    #[error("{0}")]
    Conflict(String),

    /// No record matched. Maps to `404 Not Found`.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure. Maps to `500 Internal Server Error`.
    ///
    /// `detail` is logged but never sent to the client; the response body is
    /// `public_message`.
    #[error("{detail}")]
    Internal {
        detail: String,
        public_message: &'static str,
    },
}

impl AppError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
            public_message: GENERIC_INTERNAL_MESSAGE,
        }
    }

    /// Replaces the client-facing text of an internal error.
    ///
    /// Other variants are returned unchanged.
    pub fn with_public_message(self, message: &'static str) -> Self {
        match self {
            Self::Internal { detail, .. } => Self::Internal {
                detail,
                public_message: message,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client for this error.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { public_message, .. } => (*public_message).to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        AppError::internal(format!("Database error: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Internal { detail, .. } = &self {
            tracing::error!(error = %detail, "Request failed with internal error");
        }

        (status, self.public_message()).into_response()
    }
}
