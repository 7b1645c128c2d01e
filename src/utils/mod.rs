//! Shared helpers.

/// Structured log helpers
pub mod logging;
/// Date input checks
pub mod validation;
