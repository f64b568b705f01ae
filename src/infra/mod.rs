//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Transactional email providers

pub mod db;
pub mod email;
pub mod repositories;

pub use db::{Database, Migrator};
pub use email::{sender_from_config, EmailSender, LogMailer, MailError, OutboundEmail, ResendMailer};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use email::MockEmailSender;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
