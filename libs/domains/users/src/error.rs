use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("CPF já está em uso por outro usuário")]
    DuplicateCpf,

    #[error("Email já está em uso por outro usuário")]
    DuplicateEmail,

    #[error("Usuário com dados idênticos já existe no sistema")]
    DuplicateSubmission,

    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => AppError::ValidationError(errors),
            duplicate @ (UserError::DuplicateCpf
            | UserError::DuplicateEmail
            | UserError::DuplicateSubmission) => AppError::BadRequest(duplicate.to_string()),
            UserError::NotFound(_) => AppError::NotFound("Usuário não encontrado".to_string()),
            denied @ UserError::InvalidCredentials => AppError::Unauthorized(denied.to_string()),
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("Erro ao processar senha: {}", msg))
            }
            UserError::Token(msg) => {
                AppError::InternalServerError(format!("Erro ao gerar token: {}", msg))
            }
            UserError::Internal(msg) => {
                AppError::InternalServerError(format!("Erro interno do servidor: {}", msg))
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
