use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ERP API",
        version = "0.1.0",
        description = "User registration, login and management for the ERP web client"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::auth_handlers::ApiDoc),
        (path = "/user", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
