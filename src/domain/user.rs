//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::message::Message;
use super::verify_code::code_expiry;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub verify_code: String,
    pub verify_code_expiry: DateTime<Utc>,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a brand new, unverified account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verify_code: String,
    pub verify_code_expiry: DateTime<Utc>,
}

impl NewUser {
    /// Build a pending account whose code expires one hour after `now`.
    pub fn pending(
        username: String,
        email: String,
        password_hash: String,
        verify_code: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            password_hash,
            verify_code,
            verify_code_expiry: code_expiry(now),
        }
    }
}

/// Overwrite applied to an existing unverified account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    /// New password hash; `None` keeps the stored one
    pub password_hash: Option<String>,
    pub verify_code: String,
    pub verify_code_expiry: DateTime<Utc>,
}

impl PendingUpdate {
    pub fn new(password_hash: Option<String>, verify_code: String, now: DateTime<Utc>) -> Self {
        Self {
            password_hash,
            verify_code,
            verify_code_expiry: code_expiry(now),
        }
    }
}

/// Sign-up request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignUp {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "hunter2")]
    pub password: String,
}

/// Resend-verification request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResendVerification {
    #[schema(example = "alice@example.com")]
    pub email: String,
}
