use async_trait::async_trait;

use super::{EmailSender, MailError, OutboundEmail};

/// Development mailer: logs the email instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl EmailSender for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        tracing::warn!("Email provider not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            email.from,
            email.to,
            email.subject,
            email.text
        );
        Ok(())
    }
}
