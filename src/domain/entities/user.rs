//! Domain entity representing a registered user.

use chrono::NaiveDate;

/// A registered user, identified by a unique CIN.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub cin: String,
    pub cin_release_date: NaiveDate,
    pub is_married: bool,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let user = User::new(
    ///     1,
    ///     "Jane Doe".to_string(),
    ///     "12345678".to_string(),
    ///     NaiveDate::from_ymd_opt(2022, 5, 10).unwrap(),
    ///     false,
    /// );
    /// ```
    pub fn new(
        id: i64,
        name: String,
        cin: String,
        cin_release_date: NaiveDate,
        is_married: bool,
    ) -> Self {
        Self {
            id,
            name,
            cin,
            cin_release_date,
            is_married,
        }
    }
}

/// Input data for creating a new user.
///
/// Only produced by [`crate::domain::validation::validate_new_user`], so every
/// `NewUser` has already passed the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub cin: String,
    pub cin_release_date: NaiveDate,
    pub is_married: bool,
}

impl NewUser {
    /// Attaches a store-assigned id, producing the persisted entity.
    pub fn with_id(self, id: i64) -> User {
        User::new(id, self.name, self.cin, self.cin_release_date, self.is_married)
    }
}
