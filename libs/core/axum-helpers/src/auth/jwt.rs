use super::config::JwtConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime: 24 hours
pub const ACCESS_TOKEN_TTL: i64 = 86_400;

/// Random bytes behind each refresh token
pub const REFRESH_TOKEN_BYTES: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // user id
    pub email: String, // user email
    pub jti: String,   // unique token id
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Stateless HS256 bearer tokens bound to one issuer and audience.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(issuer = %config.issuer, audience = %config.audience, "JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Sign a 24h access token for `user_id`.
    pub fn issue_access_token(
        &self,
        user_id: &str,
        email: &str,
    ) -> jsonwebtoken::errors::Result<IssuedToken> {
        self.issue_with_ttl(user_id, email, Duration::seconds(ACCESS_TOKEN_TTL))
    }

    fn issue_with_ttl(
        &self,
        user_id: &str,
        email: &str,
        ttl: Duration,
    ) -> jsonwebtoken::errors::Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let header = Header {
            alg: Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(&header, &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature, issuer, audience and expiry with zero leeway.
    pub fn verify_token(&self, token: &str) -> jsonwebtoken::errors::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = 0;

        let data = decode::<JwtClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// `true` only for a token [`verify_token`](Self::verify_token) accepts.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.verify_token(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("JWT rejected: {}", e);
                false
            }
        }
    }
}

/// Opaque refresh token: 64 random bytes, standard base64.
pub fn generate_refresh_token() -> String {
    let bytes: Vec<u8> = (0..REFRESH_TOKEN_BYTES).map(|_| rand::random::<u8>()).collect();
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-that-is-long-enough!!";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET))
    }

    #[test]
    fn test_issue_and_verify_round_trip_claims() {
        let auth = auth();
        let issued = auth.issue_access_token("42", "ana@empresa.com").unwrap();

        let claims = auth.verify_token(&issued.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "ana@empresa.com");
        assert_eq!(claims.iss, "erp-server");
        assert_eq!(claims.aud, "erp-client");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let auth = auth();
        let a = auth.issue_access_token("1", "a@x.com").unwrap();
        let b = auth.issue_access_token("1", "a@x.com").unwrap();
        let ja = auth.verify_token(&a.token).unwrap().jti;
        let jb = auth.verify_token(&b.token).unwrap().jti;
        assert_ne!(ja, jb);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-long-enough!!!"));
        let issued = other.issue_access_token("1", "a@x.com").unwrap();
        assert!(!auth().validate_token(&issued.token));
    }

    #[test]
    fn test_rejects_wrong_issuer() {
        let foreign = JwtAuth::new(&JwtConfig::new(SECRET).with_issuer("someone-else"));
        let issued = foreign.issue_access_token("1", "a@x.com").unwrap();
        assert!(!auth().validate_token(&issued.token));
    }

    #[test]
    fn test_rejects_wrong_audience() {
        let foreign = JwtAuth::new(&JwtConfig::new(SECRET).with_audience("mobile"));
        let issued = foreign.issue_access_token("1", "a@x.com").unwrap();
        assert!(!auth().validate_token(&issued.token));
    }

    #[test]
    fn test_rejects_expired_token() {
        let auth = auth();
        let issued = auth
            .issue_with_ttl("1", "a@x.com", Duration::seconds(-5))
            .unwrap();
        assert!(!auth.validate_token(&issued.token));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!auth().validate_token("not-a-jwt"));
        assert!(!auth().validate_token(""));
    }

    #[test]
    fn test_refresh_token_is_64_bytes_of_base64() {
        let token = generate_refresh_token();
        let decoded = STANDARD.decode(&token).unwrap();
        assert_eq!(decoded.len(), REFRESH_TOKEN_BYTES);
        assert_ne!(token, generate_refresh_token());
    }
}
