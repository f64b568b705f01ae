//! One-time verification codes.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::{VERIFY_CODE_MAX, VERIFY_CODE_MIN, VERIFY_CODE_TTL_SECONDS};

/// A six digit numeric verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCode(String);

impl VerifyCode {
    /// Draw a code uniformly from `100000..=999999`.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Draw a code using the supplied RNG.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value = rng.gen_range(VERIFY_CODE_MIN..=VERIFY_CODE_MAX);
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VerifyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expiry for a code written at `now`.
pub fn code_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::seconds(VERIFY_CODE_TTL_SECONDS)
}
