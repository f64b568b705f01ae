//! Outbound email providers.
//!
//! [`EmailSender`] is the seam between the application and the transactional
//! email provider. [`ResendMailer`] talks to the Resend HTTP API;
//! [`LogMailer`] only logs and is used when no API key is configured.

mod log_mailer;
mod resend;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

pub use log_mailer::LogMailer;
pub use resend::ResendMailer;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A fully rendered email ready to hand to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Provider-level failure
#[derive(Debug, Error)]
pub enum MailError {
    #[error("email transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("email template failed to render: {0}")]
    Template(#[from] askama::Error),
}

/// Transactional email capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Submit one email to the provider
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

/// Build the sender selected by configuration.
pub fn sender_from_config(config: &Config) -> Result<Arc<dyn EmailSender>, MailError> {
    match config.resend_api_key() {
        Some(api_key) => {
            tracing::info!(api = %config.resend_api_url, "Using Resend for outbound email");
            Ok(Arc::new(ResendMailer::new(api_key, &config.resend_api_url)?))
        }
        None => Ok(Arc::new(LogMailer)),
    }
}
