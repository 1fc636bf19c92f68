//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    cin: String,
    cin_release_date: NaiveDate,
    is_married: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            row.id,
            row.name,
            row.cin,
            row.cin_release_date,
            row.is_married,
        )
    }
}

/// PostgreSQL repository for users.
///
/// CIN uniqueness is backed by the `users_cin_key` constraint; a violation on
/// insert surfaces as [`AppError::Conflict`].
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, cin, cin_release_date, is_married)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, cin, cin_release_date, is_married
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.cin)
        .bind(new_user.cin_release_date)
        .bind(new_user.is_married)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_cin(&self, cin: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, cin, cin_release_date, is_married
            FROM users
            WHERE cin = $1
            "#,
        )
        .bind(cin)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_cin_and_release_date(
        &self,
        cin: &str,
        cin_release_date: NaiveDate,
    ) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, cin, cin_release_date, is_married
            FROM users
            WHERE cin = $1 AND cin_release_date = $2
            "#,
        )
        .bind(cin)
        .bind(cin_release_date)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
