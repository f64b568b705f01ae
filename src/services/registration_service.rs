//! Registration service - sign-up and verification code (re)issue.
//!
//! A registration always leaves a pending (unverified) record behind, even
//! when the verification email cannot be sent. The outcome carries the
//! dispatch result so callers can report it, and `resend_verification`
//! retries dispatch against the same record.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::config::{HashingConfig, MSG_ALREADY_VERIFIED, MSG_EMAIL_TAKEN, MSG_USERNAME_TAKEN, MSG_USER_NOT_FOUND};
use crate::domain::{NewUser, Password, PendingUpdate, SignUp, User, VerifyCode};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

use super::verification_email::{EmailDispatchResult, VerificationMailer};

/// A persisted pending account plus the result of emailing its code
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub user: User,
    pub dispatch: EmailDispatchResult,
}

impl RegistrationOutcome {
    pub fn email_sent(&self) -> bool {
        self.dispatch.success
    }

    /// Turn a failed dispatch into an error carrying the dispatcher's message.
    pub fn into_result(self) -> AppResult<User> {
        if self.dispatch.success {
            Ok(self.user)
        } else {
            Err(AppError::EmailDispatch(self.dispatch.message))
        }
    }
}

/// Registration service trait for dependency injection.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create or refresh an unverified account and email its code
    async fn register(&self, request: SignUp) -> AppResult<RegistrationOutcome>;

    /// Issue a fresh code for an unverified account and email it
    async fn resend_verification(&self, email: &str) -> AppResult<RegistrationOutcome>;
}

/// Concrete implementation of RegistrationService.
pub struct Registrar {
    users: Arc<dyn UserRepository>,
    mailer: VerificationMailer,
    hashing: HashingConfig,
}

impl Registrar {
    pub fn new(
        users: Arc<dyn UserRepository>,
        mailer: VerificationMailer,
        hashing: HashingConfig,
    ) -> Self {
        Self {
            users,
            mailer,
            hashing,
        }
    }

    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(Password::new(password, &self.hashing)?.into_string())
    }
}

#[async_trait]
impl RegistrationService for Registrar {
    async fn register(&self, request: SignUp) -> AppResult<RegistrationOutcome> {
        let SignUp {
            username,
            email,
            password,
        } = request;

        if self.users.find_verified_by_username(&username).await?.is_some() {
            tracing::debug!("Sign-up rejected: username taken");
            return Err(AppError::conflict(MSG_USERNAME_TAKEN));
        }

        let existing = self.users.find_by_email(&email).await?;
        let verify_code = VerifyCode::generate();

        let user = match existing {
            Some(user) if user.is_verified => {
                tracing::debug!(
                    user_id = %user.id,
                    "Sign-up rejected: email belongs to a verified user"
                );
                return Err(AppError::conflict(MSG_EMAIL_TAKEN));
            }
            Some(user) => {
                let update = PendingUpdate::new(
                    Some(self.hash(&password)?),
                    verify_code.as_str().to_string(),
                    Utc::now(),
                );
                let user = self.users.update_pending(user.id, update).await?;
                tracing::info!(user_id = %user.id, "Refreshed unverified account");
                user
            }
            None => {
                let new_user = NewUser::pending(
                    username.clone(),
                    email.clone(),
                    self.hash(&password)?,
                    verify_code.as_str().to_string(),
                    Utc::now(),
                );
                let user = self.users.create(new_user).await?;
                tracing::info!(user_id = %user.id, "Created unverified account");
                user
            }
        };

        let dispatch = self
            .mailer
            .send(user.id, &email, &username, verify_code.as_str())
            .await;

        Ok(RegistrationOutcome { user, dispatch })
    }

    async fn resend_verification(&self, email: &str) -> AppResult<RegistrationOutcome> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))?;

        if user.is_verified {
            return Err(AppError::validation(MSG_ALREADY_VERIFIED));
        }

        let verify_code = VerifyCode::generate();
        let update = PendingUpdate::new(None, verify_code.as_str().to_string(), Utc::now());
        // A conflict here means the account was verified after the lookup.
        let user = self
            .users
            .update_pending(user.id, update)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::validation(MSG_ALREADY_VERIFIED),
                other => other,
            })?;
        tracing::info!(user_id = %user.id, "Reissued verification code");

        let dispatch = self
            .mailer
            .send(user.id, &user.email, &user.username, verify_code.as_str())
            .await;

        Ok(RegistrationOutcome { user, dispatch })
    }
}
