use axum_helpers::{AuditEvent, AuditOutcome, JwtAuth, generate_refresh_token};
use br_validators::normalize_email;
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::LoginResponse;
use crate::repository::UserRepository;
use crate::service::verify_password;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login realizado com sucesso";

/// Credential check and bearer token issuance
#[derive(Clone)]
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Verify email and password and issue a 24h access token plus a
    /// refresh token.
    ///
    /// An unknown email and a wrong password fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> UserResult<LoginResponse> {
        let email = normalize_email(email);

        let Some(user) = self.repository.get_by_email(&email).await? else {
            tracing::info!("Login rejected: unknown email");
            login_event(None, AuditOutcome::Denied, "unknown email").log();
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            login_event(Some(user.id), AuditOutcome::Denied, "wrong password").log();
            return Err(UserError::InvalidCredentials);
        }

        let issued = self
            .jwt
            .issue_access_token(&user.id.to_string(), &user.email)
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(user_id = user.id, "User logged in");
        login_event(Some(user.id), AuditOutcome::Success, "login").log();

        Ok(LoginResponse {
            sucesso: true,
            token: issued.token,
            refresh_token: generate_refresh_token(),
            expires_at: issued.expires_at,
            usuario: user.into(),
            mensagem: LOGIN_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Signature, issuer, audience and expiry check. Never errors.
    pub fn validate_token(&self, token: &str) -> bool {
        self.jwt.validate_token(token)
    }
}

/// `user.login` audit record. The email is left out of the record.
fn login_event(user_id: Option<i32>, outcome: AuditOutcome, summary: &str) -> AuditEvent {
    AuditEvent::new(
        user_id.map(|id| id.to_string()),
        "user.login",
        user_id.map(|id| format!("user:{id}")),
        outcome,
    )
    .with_summary(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use crate::service::hash_password;
    use axum_helpers::JwtConfig;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("a-test-secret-that-is-at-least-32-chars"))
    }

    fn user(password: &str) -> User {
        User {
            id: 3,
            name: "Maria Silva".to_string(),
            cpf: "11144477735".to_string(),
            email: "maria@example.com".to_string(),
            phone: "11987654321".to_string(),
            password_hash: hash_password(password).unwrap(),
            addresses: vec![],
        }
    }

    #[tokio::test]
    async fn test_login_issues_tokens() {
        let stored = user("Abc#123");
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .withf(|email| email == "maria@example.com")
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(mock_repo, jwt());
        let response = service
            .login(" Maria@Example.com ", "Abc#123")
            .await
            .unwrap();

        assert!(response.sucesso);
        assert_eq!(response.usuario.id, 3);
        assert_eq!(response.mensagem, LOGIN_SUCCESS_MESSAGE);
        assert!(service.validate_token(&response.token));
        assert!(!response.refresh_token.is_empty());
        assert!(response.expires_at > chrono::Utc::now());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let stored = user("Abc#123");
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(mock_repo, jwt());
        let result = service.login("maria@example.com", "Wrong#1").await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));

        let service = AuthService::new(mock_repo, jwt());
        let result = service.login("ghost@example.com", "Abc#123").await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[test]
    fn test_validate_token_rejects_garbage() {
        let service = AuthService::new(MockUserRepository::new(), jwt());
        assert!(!service.validate_token("not-a-jwt"));
        assert!(!service.validate_token(""));
    }

    #[test]
    fn test_login_event_records_denial() {
        let event = login_event(None, AuditOutcome::Denied, "unknown email");
        let rendered: serde_json::Value = serde_json::from_str(&event.render()).unwrap();

        assert_eq!(rendered["action"], "user.login");
        assert_eq!(rendered["outcome"], "denied");
        assert_eq!(rendered["summary"], "unknown email");
        assert!(rendered["user_id"].is_null());
    }

    #[test]
    fn test_login_event_names_known_user() {
        let event = login_event(Some(3), AuditOutcome::Denied, "wrong password");

        assert_eq!(event.user_id.as_deref(), Some("3"));
        assert_eq!(event.resource.as_deref(), Some("user:3"));
        assert_eq!(event.outcome, AuditOutcome::Denied);
    }
}
