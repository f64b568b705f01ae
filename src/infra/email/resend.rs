//! Resend HTTP API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{EmailSender, MailError, OutboundEmail};
use crate::config::APP_USER_AGENT;

/// Request body of `POST /emails`
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Sends email through the Resend API.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ResendMailer {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, MailError> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let body = SendEmailRequest {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status, body });
        }

        tracing::debug!(to = %email.to, "Email accepted by Resend");
        Ok(())
    }
}
