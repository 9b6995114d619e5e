//! JWT configuration, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

pub const DEFAULT_ISSUER: &str = "erp-server";
pub const DEFAULT_AUDIENCE: &str = "erp-client";

/// JWT signing settings.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ISSUER` (default `erp-server`)
/// - `JWT_AUDIENCE` (default `erp-client`)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            issuer: env_or_default("JWT_ISSUER", DEFAULT_ISSUER),
            audience: env_or_default("JWT_AUDIENCE", DEFAULT_AUDIENCE),
        })
    }
}
