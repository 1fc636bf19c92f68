//! User registration and lookup service.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::domain::validation::{UserCandidate, validate_new_user};
use crate::error::AppError;

/// Conflict message for a CIN that is already registered.
pub fn duplicate_cin_message(cin: &str) -> String {
    format!("User with CIN {cin} already exists.")
}

/// Service for registering users and looking them up by CIN.
///
/// Enforces CIN uniqueness with a lookup before insert. The store's unique
/// constraint catches the case where two requests for the same CIN both pass
/// the lookup; that late violation is reported as the same conflict.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Current date according to the service clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Runs the field rules against a candidate using the service clock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with the first rule the candidate breaks.
    pub fn validate(&self, candidate: Option<UserCandidate>) -> Result<NewUser, AppError> {
        Ok(validate_new_user(candidate, self.today())?)
    }

    /// Persists a validated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a user with the same CIN exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        if self.repository.find_by_cin(&new_user.cin).await?.is_some() {
            tracing::warn!(cin = %new_user.cin, "User creation failed: CIN already exists");
            return Err(AppError::conflict(duplicate_cin_message(&new_user.cin)));
        }

        let cin = new_user.cin.clone();

        match self.repository.create(new_user).await {
            Ok(user) => {
                tracing::debug!(id = user.id, cin = %user.cin, "User created");
                Ok(user)
            }
            Err(AppError::Conflict(detail)) => {
                tracing::warn!(
                    cin = %cin,
                    detail = %detail,
                    "User creation lost a race on CIN uniqueness"
                );
                Err(AppError::conflict(duplicate_cin_message(&cin)))
            }
            Err(e) => Err(e),
        }
    }

    /// Validates a candidate and persists it.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`] and [`Self::create_user`].
    pub async fn register(&self, candidate: Option<UserCandidate>) -> Result<User, AppError> {
        let new_user = self.validate(candidate)?;
        self.create_user(new_user).await
    }

    /// Retrieves a user by CIN and CIN release date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches both values.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_user_by_cin_and_release_date(
        &self,
        cin: &str,
        cin_release_date: NaiveDate,
    ) -> Result<User, AppError> {
        tracing::debug!(cin, %cin_release_date, "Looking up user by CIN and release date");

        self.repository
            .find_by_cin_and_release_date(cin, cin_release_date)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "User not found with CIN: {cin} and Release Date: {cin_release_date}"
                ))
            })
    }

    /// Retrieves a user by CIN alone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this CIN.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_user_by_cin(&self, cin: &str) -> Result<User, AppError> {
        tracing::debug!(cin, "Looking up user by CIN");

        self.repository
            .find_by_cin(cin)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User not found with CIN: {cin}")))
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
