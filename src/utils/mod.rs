//! Utility functions and helpers.

pub mod templates;
