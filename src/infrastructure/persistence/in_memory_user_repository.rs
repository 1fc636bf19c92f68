//! Process-local user repository.
//!
//! Holds users in memory behind an async lock. Used by handler tests and for
//! running the API without a database.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    by_cin: BTreeMap<String, User>,
}

/// In-memory repository with the same CIN uniqueness guarantee as the
/// PostgreSQL table.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;

        if inner.by_cin.contains_key(&new_user.cin) {
            return Err(AppError::conflict("Unique constraint violation"));
        }

        inner.next_id += 1;
        let user = new_user.with_id(inner.next_id);
        inner.by_cin.insert(user.cin.clone(), user.clone());

        Ok(user)
    }

    async fn find_by_cin(&self, cin: &str) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.by_cin.get(cin).cloned())
    }

    async fn find_by_cin_and_release_date(
        &self,
        cin: &str,
        cin_release_date: NaiveDate,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .by_cin
            .get(cin)
            .filter(|user| user.cin_release_date == cin_release_date)
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.by_cin.len() as i64)
    }
}
