//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, EmailSender};
use crate::services::{RegistrationService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Registration service
    pub registration_service: Arc<dyn RegistrationService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from the database, the email sender and config.
    pub fn from_config(
        database: Arc<Database>,
        sender: Arc<dyn EmailSender>,
        config: &Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), sender, config);

        Self {
            registration_service: container.registration(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(registration_service: Arc<dyn RegistrationService>, database: Arc<Database>) -> Self {
        Self {
            registration_service,
            database,
        }
    }
}
