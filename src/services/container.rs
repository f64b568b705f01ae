//! Service Container - Centralized service access.
//!
//! Builds every service once from its injected capabilities (database
//! connection, email sender) and hands out shared handles.

use std::sync::Arc;

use super::{Registrar, RegistrationService, VerificationMailer};
use crate::config::Config;
use crate::infra::{EmailSender, UserRepository, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get registration service
    fn registration(&self) -> Arc<dyn RegistrationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    registration_service: Arc<dyn RegistrationService>,
}

impl Services {
    /// Create a container around an already built service
    pub fn new(registration_service: Arc<dyn RegistrationService>) -> Self {
        Self {
            registration_service,
        }
    }

    /// Wire services from a user repository and an email sender
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        sender: Arc<dyn EmailSender>,
        config: &Config,
    ) -> Self {
        let mailer = VerificationMailer::new(sender, config.email_from.clone());
        let registration_service = Arc::new(Registrar::new(users, mailer, config.hashing));

        Self {
            registration_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: Arc<sea_orm::DatabaseConnection>,
        sender: Arc<dyn EmailSender>,
        config: &Config,
    ) -> Self {
        Self::from_parts(Arc::new(UserStore::new(db)), sender, config)
    }
}

impl ServiceContainer for Services {
    fn registration(&self) -> Arc<dyn RegistrationService> {
        self.registration_service.clone()
    }
}
