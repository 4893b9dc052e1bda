//! User entity and its password-free public view.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored user account, including the password hash.
///
/// Never serialized. Convert with [`User::into_public`] before the value
/// leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Strips the password hash.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A user record without its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a user. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Partial update for a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none()
    }
}
