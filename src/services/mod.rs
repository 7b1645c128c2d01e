//! Clients for external services and the health endpoint.

/// Service-account tokens for Google APIs
pub mod google_auth;
/// HTTP health endpoints
pub mod health;
/// Cell reads and writes
pub mod sheets;
/// YooMoney OAuth authorization
pub mod yoomoney;
