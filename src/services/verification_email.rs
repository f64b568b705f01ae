//! Verification email dispatch.
//!
//! Renders the verification template and hands it to the configured
//! [`EmailSender`]. Provider failures are logged and folded into an
//! [`EmailDispatchResult`]; they never propagate as errors.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::{MSG_EMAIL_FAILED, MSG_EMAIL_SENT, VERIFICATION_EMAIL_SUBJECT};
use crate::infra::{EmailSender, MailError, OutboundEmail};
use crate::utils::templates;

/// Outcome of a dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDispatchResult {
    pub success: bool,
    pub message: String,
}

impl EmailDispatchResult {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: MSG_EMAIL_SENT.to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: MSG_EMAIL_FAILED.to_string(),
        }
    }
}

/// Sends verification codes from a fixed sender address.
#[derive(Clone)]
pub struct VerificationMailer {
    sender: Arc<dyn EmailSender>,
    from: String,
}

impl VerificationMailer {
    pub fn new(sender: Arc<dyn EmailSender>, from: impl Into<String>) -> Self {
        Self {
            sender,
            from: from.into(),
        }
    }

    /// Build the email for `username` at `email` carrying `verify_code`.
    pub fn compose(
        &self,
        email: &str,
        username: &str,
        verify_code: &str,
    ) -> Result<OutboundEmail, MailError> {
        let body = templates::verification_email(username, verify_code)?;

        Ok(OutboundEmail {
            from: self.from.clone(),
            to: email.to_string(),
            subject: VERIFICATION_EMAIL_SUBJECT.to_string(),
            html: body.html,
            text: body.text,
        })
    }

    /// Render and send the verification email for account `user_id`.
    pub async fn send(
        &self,
        user_id: Uuid,
        email: &str,
        username: &str,
        verify_code: &str,
    ) -> EmailDispatchResult {
        let message = match self.compose(email, username, verify_code) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(%user_id, error = %e, "Error rendering verification email");
                return EmailDispatchResult::failed();
            }
        };

        match self.sender.send(message).await {
            Ok(()) => {
                tracing::info!(%user_id, "Verification email sent");
                EmailDispatchResult::sent()
            }
            Err(e) => {
                tracing::error!(%user_id, error = %e, "Error sending verification email");
                EmailDispatchResult::failed()
            }
        }
    }
}
