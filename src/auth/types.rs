//! Types for authentication and user management

use serde::{Deserialize, Serialize};

/// User data as returned by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The user's email address
    pub email: Option<String>,

    /// The user's role
    pub role: Option<String>,

    /// The creation time
    pub created_at: Option<String>,
}

/// The resolved identity of the signed-in user
///
/// Everything identity-scoped only needs the id; it is stamped as `user_id` on
/// every record the client writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// The user ID
    pub id: String,
    /// The user's email address, when known
    pub email: Option<String>,
}

impl From<User> for UserIdentity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Token grant response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Option<User>,
}
