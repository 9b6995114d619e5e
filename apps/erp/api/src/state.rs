//! Application state management.
//!
//! This module defines the shared application state used to build the
//! domain routers and the readiness check.

use axum_helpers::JwtAuth;

/// Shared application state.
///
/// Cloning is cheap: the connection pool and the JWT keys are shared.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Signs and verifies bearer tokens
    pub jwt_auth: JwtAuth,
}
