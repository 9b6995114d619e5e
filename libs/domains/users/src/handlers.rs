use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AddressInput, AddressResponse, RegisterUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(register_user, list_users, get_user, update_user),
    components(
        schemas(UserResponse, AddressResponse, RegisterUser, UpdateUser, AddressInput),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User registration and management")
    )
)]
pub struct ApiDoc;

/// Create the users router, nested by the app under `/api/user`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register_user))
        .route("/list", get(list_users))
        .route("/{id}", get(get_user).put(update_user))
        .with_state(shared_service)
}

/// Register a new user with addresses
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User created", body = UserResponse,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;
    let location = format!("/api/user/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// List every user with addresses
#[utoipa::path(
    get,
    path = "/list",
    tag = TAG,
    responses(
        (status = 200, description = "All users ordered by id", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list().await?;
    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<i32>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_by_id(id).await?;
    Ok(Json(user))
}

/// Replace a user's data and addresses
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update(id, input).await?;
    Ok(Json(user))
}
