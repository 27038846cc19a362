use axum::extract::State;
use axum::Json;

use account_lib::repository::traits::{AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::routes::AUTHORITIES_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = AUTHORITIES_PATH,
    tag = "users",
    responses(
        (status = 200, description = "All authority names", body = Vec<String>),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_authorities<U, A, S>(
    State(state): State<AppState<U, A, S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    state
        .user_service
        .get_authorities()
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_authorities"))
}
