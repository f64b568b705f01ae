//! HTTP request handlers.

pub mod health_handler;
pub mod sign_up_handler;

pub use health_handler::health;
pub use sign_up_handler::sign_up_routes;
