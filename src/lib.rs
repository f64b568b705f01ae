//! Mystery Message - account sign-up and email verification.
//!
//! An Axum service that registers users, keeps unverified accounts
//! refreshable, and emails one-time verification codes.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Accounts, passwords, verification codes, message content
//! - **services**: Registration and verification email use cases
//! - **infra**: Database, repositories and email providers
//! - **api**: HTTP handlers and routes
//! - **types**: Shared response types
//! - **utils**: Email templates
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{MessageContent, Password, User, VerifyCode};
pub use errors::{AppError, AppResult};
