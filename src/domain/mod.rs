//! Domain layer - Core business entities and logic
//!
//! Entities and value objects for accounts, verification codes and
//! message content. No infrastructure dependencies beyond error types.

pub mod message;
pub mod password;
pub mod user;
pub mod verify_code;

pub use message::{Message, MessageContent};
pub use password::Password;
pub use user::{NewUser, PendingUpdate, ResendVerification, SignUp, User};
pub use verify_code::{code_expiry, VerifyCode};
