//! Bearer-token authentication.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let issued = auth.issue_access_token("42", "ana@empresa.com")?;
//! assert!(auth.validate_token(&issued.token));
//! ```

pub mod config;
pub mod jwt;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, IssuedToken, JwtAuth, JwtClaims, generate_refresh_token};
