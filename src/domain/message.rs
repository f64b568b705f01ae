//! Anonymous messages and the content validation rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::{MAX_MESSAGE_LENGTH, MIN_MESSAGE_LENGTH};

/// A message stored on a user's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Message content schema: 4 to 300 characters inclusive.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MessageContent {
    #[validate(custom(function = "content_length"))]
    #[schema(example = "What is your favourite film?", min_length = 4, max_length = 300)]
    pub content: String,
}

impl MessageContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Validate and return one human-readable message per violated bound.
    pub fn check(&self) -> Result<(), Vec<String>> {
        self.validate().map_err(|e| messages(&e))
    }
}

fn content_length(content: &str) -> Result<(), ValidationError> {
    let len = content.chars().count() as u64;
    let message = if len < MIN_MESSAGE_LENGTH {
        format!("Content must be at least {} characters.", MIN_MESSAGE_LENGTH)
    } else if len > MAX_MESSAGE_LENGTH {
        format!(
            "Content must not be longer than {} characters.",
            MAX_MESSAGE_LENGTH
        )
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("length");
    error.message = Some(message.into());
    Err(error)
}

fn messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}
