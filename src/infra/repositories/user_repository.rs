//! User repository backed by SeaORM.
//!
//! Uniqueness is enforced by the database: the email index and the partial
//! index on verified usernames. Violations surface as conflict errors with
//! the same messages the lookups produce.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::{MSG_EMAIL_TAKEN, MSG_USERNAME_TAKEN, MSG_USER_NOT_FOUND};
use crate::domain::{NewUser, PendingUpdate, User};
use crate::errors::{AppError, AppResult};
use crate::infra::db::migrations::VERIFIED_USERNAME_INDEX;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the verified user holding `username`
    async fn find_verified_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user (verified or not) by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new unverified user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite code, expiry and optionally password of an unverified user.
    ///
    /// Fails with a conflict if the user was verified in the meantime.
    async fn update_pending(&self, id: Uuid, update: PendingUpdate) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Map unique index violations to the conflict the lookups would have reported.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => conflict_for_violation(&detail),
        _ => AppError::from(err),
    }
}

/// Pick the conflict message from the violated index named in `detail`.
fn conflict_for_violation(detail: &str) -> AppError {
    tracing::debug!("Unique constraint violation: {}", detail);
    if detail.contains(VERIFIED_USERNAME_INDEX) {
        AppError::conflict(MSG_USERNAME_TAKEN)
    } else {
        AppError::conflict(MSG_EMAIL_TAKEN)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_verified_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::IsVerified.eq(true))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            verify_code: Set(new_user.verify_code),
            verify_code_expiry: Set(new_user.verify_code_expiry),
            is_verified: Set(false),
            is_accepting_messages: Set(true),
            messages: Set(serde_json::json!([])),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(map_write_error)?;
        Ok(User::from(model))
    }

    async fn update_pending(&self, id: Uuid, update: PendingUpdate) -> AppResult<User> {
        let mut query = UserEntity::update_many()
            .col_expr(user::Column::VerifyCode, Expr::value(update.verify_code))
            .col_expr(
                user::Column::VerifyCodeExpiry,
                Expr::value(update.verify_code_expiry),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(password_hash) = update.password_hash {
            query = query.col_expr(user::Column::PasswordHash, Expr::value(password_hash));
        }

        // Only rows that are still unverified may be overwritten.
        let result = query
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::IsVerified.eq(false))
            .exec(self.db.as_ref())
            .await
            .map_err(map_write_error)?;

        if result.rows_affected == 0 {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))
    }
}
