use axum::Router;
use domain_users::{AuthService, PgUserRepository, auth_handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    // Same table as /user, separate pool handle (cheap clone)
    let repository = PgUserRepository::new(state.db.clone());
    let service = AuthService::new(repository, state.jwt_auth.clone());
    auth_handlers::router(service)
}
