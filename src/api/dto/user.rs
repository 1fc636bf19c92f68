//! DTOs for user endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::domain::validation::UserCandidate;

/// Request body for `POST /api/v1/users`.
///
/// Every field is optional so that missing values reach the validator and get
/// the documented message instead of a decoder error. An `id` in the body is
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub cin: Option<String>,
    pub cin_release_date: Option<NaiveDate>,
    /// Older clients send this flag as `marriedStatus`.
    #[serde(alias = "marriedStatus")]
    pub is_married: Option<bool>,
}

impl From<CreateUserRequest> for UserCandidate {
    fn from(req: CreateUserRequest) -> Self {
        UserCandidate {
            name: req.name,
            cin: req.cin,
            cin_release_date: req.cin_release_date,
            is_married: req.is_married.unwrap_or(false),
        }
    }
}

/// Query parameters for `GET /api/v1/users/cin/{cin}`.
#[derive(Debug, Default, Deserialize)]
pub struct ReleaseDateQuery {
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
}

/// A persisted user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub cin: String,
    pub cin_release_date: NaiveDate,
    pub is_married: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            cin: user.cin,
            cin_release_date: user.cin_release_date,
            is_married: user.is_married,
        }
    }
}
