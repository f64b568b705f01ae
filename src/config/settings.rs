//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_ARGON2_ITERATIONS, DEFAULT_ARGON2_MEMORY_KIB, DEFAULT_ARGON2_PARALLELISM,
    DEFAULT_DATABASE_URL, DEFAULT_EMAIL_FROM, DEFAULT_RESEND_API_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Resend API key; `None` selects the logging mailer
    resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub email_from: String,
    pub hashing: HashingConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field(
                "resend_api_key",
                &self.resend_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("resend_api_url", &self.resend_api_url)
            .field("email_from", &self.email_from)
            .field("hashing", &self.hashing)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            hashing: HashingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let resend_api_key = env::var("RESEND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if resend_api_key.is_none() {
            tracing::warn!("RESEND_API_KEY not set, verification emails will only be logged");
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            resend_api_key,
            resend_api_url: env::var("RESEND_API_URL")
                .unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string()),
            email_from: env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_EMAIL_FROM.to_string()),
            hashing: HashingConfig {
                memory_kib: parse_var("ARGON2_MEMORY_KIB").unwrap_or(DEFAULT_ARGON2_MEMORY_KIB),
                iterations: parse_var("ARGON2_ITERATIONS").unwrap_or(DEFAULT_ARGON2_ITERATIONS),
                parallelism: parse_var("ARGON2_PARALLELISM")
                    .unwrap_or(DEFAULT_ARGON2_PARALLELISM),
            },
        }
    }

    /// Set the Resend API key explicitly.
    pub fn with_resend_api_key(mut self, key: impl Into<String>) -> Self {
        self.resend_api_key = Some(key.into());
        self
    }

    /// Resend API key, if configured.
    pub fn resend_api_key(&self) -> Option<&str> {
        self.resend_api_key.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::default().with_resend_api_key("re_secret_key");
        let output = format!("{:?}", config);

        assert!(!output.contains("re_secret_key"));
        assert!(!output.contains("postgres://"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_default_has_no_api_key() {
        assert!(Config::default().resend_api_key().is_none());
    }
}
