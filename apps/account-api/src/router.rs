use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use account_lib::repository::traits::{AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait};

use crate::methods::get_authorities::get_authorities;
use crate::methods::get_public_users::get_all_public_users;
use crate::methods::health_check::health_check;
use crate::methods::routes::{
    AUTHORITIES_PATH, OPENAPI_JSON_PATH, SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH, USERS_PATH,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// API routes without middleware.
pub fn api_router<U, A, S>(state: AppState<U, A, S>) -> Router
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    Router::new()
        .route(USERS_PATH, get(get_all_public_users::<U, A, S>))
        .route(AUTHORITIES_PATH, get(get_authorities::<U, A, S>))
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .with_state(state)
}

/// Full application router: API routes plus Swagger UI.
pub fn app_router<U, A, S>(state: AppState<U, A, S>) -> Router
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    api_router(state)
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
