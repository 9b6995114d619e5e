//! `/api/auth` endpoints.
//!
//! These keep the `{sucesso, mensagem}` envelope the web client reads instead
//! of the shared error body.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_helpers::validation_messages;
use std::sync::Arc;
use utoipa::OpenApi;
use validator::Validate;

use crate::auth::AuthService;
use crate::error::UserError;
use crate::models::{
    AuthFailure, LoginRequest, LoginResponse, SessionUser, TokenRequest, TokenValidationResponse,
};
use crate::repository::UserRepository;

pub const TAG: &str = "auth";

const INVALID_DATA: &str = "Dados inválidos";
const TOKEN_REQUIRED: &str = "Token é obrigatório";

#[derive(OpenApi)]
#[openapi(
    paths(login, validate_token),
    components(schemas(
        LoginRequest,
        LoginResponse,
        SessionUser,
        TokenRequest,
        TokenValidationResponse,
        AuthFailure
    )),
    tags(
        (name = TAG, description = "Login and token validation")
    )
)]
pub struct ApiDoc;

/// Create the auth router, nested by the app under `/api/auth`
pub fn router<R: UserRepository + 'static>(service: AuthService<R>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/validator-token", post(validate_token))
        .with_state(Arc::new(service))
}

fn failure(status: StatusCode, body: AuthFailure) -> Response {
    (status, Json(body)).into_response()
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Malformed input", body = AuthFailure),
        (status = 401, description = "Invalid credentials", body = AuthFailure)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return failure(
                StatusCode::BAD_REQUEST,
                AuthFailure::new(INVALID_DATA).with_errors(vec![rejection.body_text()]),
            );
        }
    };

    if let Err(errors) = input.validate() {
        return failure(
            StatusCode::BAD_REQUEST,
            AuthFailure::new(INVALID_DATA).with_errors(validation_messages(&errors)),
        );
    }

    match service.login(&input.email, &input.password).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err @ UserError::InvalidCredentials) => {
            failure(StatusCode::UNAUTHORIZED, AuthFailure::new(err.to_string()))
        }
        Err(err) => err.into_response(),
    }
}

/// Check whether a bearer token is currently valid
#[utoipa::path(
    post,
    path = "/validator-token",
    tag = TAG,
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Verdict", body = TokenValidationResponse),
        (status = 400, description = "Missing token", body = AuthFailure)
    )
)]
async fn validate_token<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Response {
    let token = payload.map(|Json(req)| req.token).unwrap_or_default();

    if token.is_empty() {
        return failure(StatusCode::BAD_REQUEST, AuthFailure::new(TOKEN_REQUIRED));
    }

    let valido = service.validate_token(&token);
    let mensagem = if valido { "Token válido" } else { "Token inválido" };

    Json(TokenValidationResponse {
        sucesso: true,
        valido,
        mensagem: mensagem.to_string(),
    })
    .into_response()
}
