//! # Axum Helpers
//!
//! Shared web plumbing for the ERP services.
//!
//! - **[`auth`]**: stateless JWT issuance and validation
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: validated JSON extractor
//! - **[`audit`]**: audit records on the `audit` tracing target
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes)?.merge(health_router(app_info!()));
//! let config = ServerConfig::default();
//! create_production_app(router, &config, config.shutdown_timeout, async {}).await?;
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, IssuedToken, JwtAuth, JwtClaims, JwtConfig, generate_refresh_token,
};

pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_PATH, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, validation_details, validation_messages};

pub use extractors::ValidatedJson;

pub use audit::{AuditEvent, AuditOutcome};
