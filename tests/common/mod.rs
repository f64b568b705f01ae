//! Shared test doubles: an in-memory user store and a recording mailer.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use mystery_message::config::{Config, HashingConfig, MSG_EMAIL_TAKEN, MSG_USER_NOT_FOUND};
use mystery_message::domain::{NewUser, PendingUpdate, User};
use mystery_message::errors::{AppError, AppResult};
use mystery_message::infra::{EmailSender, MailError, OutboundEmail, UserRepository};

/// Cheap Argon2 parameters so tests stay fast.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.hashing = HashingConfig {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    };
    config
}

/// Materialize a stored user from creation fields.
pub fn user_from_new(new_user: NewUser) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: new_user.username,
        email: new_user.email,
        password_hash: new_user.password_hash,
        verify_code: new_user.verify_code,
        verify_code_expiry: new_user.verify_code_expiry,
        is_verified: false,
        is_accepting_messages: true,
        messages: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// A user that already completed verification.
pub fn verified_user(username: &str, email: &str) -> User {
    let mut user = user_from_new(NewUser::pending(
        username.to_string(),
        email.to_string(),
        "$argon2id$v=19$m=256,t=1,p=1$c29tZXNhbHQ$aGFzaA".to_string(),
        "654321".to_string(),
        Utc::now(),
    ));
    user.is_verified = true;
    user
}

/// In-memory store with the same uniqueness rules as the database.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_verified_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.is_verified && u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }
        let user = user_from_new(new_user);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_pending(&self, id: Uuid, update: PendingUpdate) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))?;
        if user.is_verified {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }
        if let Some(hash) = update.password_hash {
            user.password_hash = hash;
        }
        user.verify_code = update.verify_code;
        user.verify_code_expiry = update.verify_code_expiry;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

/// Mailer that records every email and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        if self.fail {
            return Err(MailError::Rejected {
                status: 500,
                body: "provider down".to_string(),
            });
        }
        Ok(())
    }
}

/// Pull the six digit code out of a rendered verification email.
pub fn code_in(email: &OutboundEmail) -> String {
    email
        .text
        .lines()
        .map(str::trim)
        .find(|line| line.len() == 6 && line.chars().all(|c| c.is_ascii_digit()))
        .expect("verification email without a code")
        .to_string()
}
