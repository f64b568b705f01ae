//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod container;
mod registration_service;
mod verification_email;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use registration_service::{Registrar, RegistrationOutcome, RegistrationService};
pub use verification_email::{EmailDispatchResult, VerificationMailer};
