//! Types for authentication and identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Canonical user identity used throughout the crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The display name
    pub username: String,

    /// The user's email address
    pub email: String,

    /// The account role
    pub role: UserRole,

    /// The creation time
    pub created_at: DateTime<Utc>,

    /// The update time
    pub updated_at: DateTime<Utc>,
}

/// Raw user shape returned by the identity endpoint
///
/// The backend exposes the id as `_id`; [`User`] is the canonical shape.
/// The conversion below is the single place where that mapping happens.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApiUser> for User {
    fn from(api_user: ApiUser) -> Self {
        Self {
            id: api_user.id,
            username: api_user.username,
            email: api_user.email,
            role: api_user.role,
            created_at: api_user.created_at,
            updated_at: api_user.updated_at,
        }
    }
}

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of the login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The issued bearer token; absent on some backend failure modes
    pub access_token: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,
}
