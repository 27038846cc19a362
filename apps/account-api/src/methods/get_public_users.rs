use axum::extract::{OriginalUri, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::extract::Query;

use account_lib::repository::traits::{AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{PublicUserResponse, PublicUsersQuery};
use crate::methods::pagination::pagination_headers;
use crate::methods::routes::USERS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USERS_PATH,
    tag = "users",
    params(PublicUsersQuery),
    responses(
        (status = 200, description = "Activated users, public fields only", body = Vec<PublicUserResponse>,
            headers(
                ("X-Total-Count" = u64, description = "Total number of activated users"),
                ("Link" = String, description = "Pagination links"),
            )
        ),
        (status = 400, description = "Sort property not allowed or malformed paging"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_all_public_users<U, A, S>(
    State(state): State<AppState<U, A, S>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PublicUsersQuery>,
) -> Result<(HeaderMap, Json<Vec<PublicUserResponse>>), ApiError>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    let pagination = query.into_pagination().map_err(|e| {
        tracing::debug!(error = %e, "rejected sort request");
        ApiError::from(e)
    })?;

    let page = state
        .user_service
        .get_all_public_users(pagination)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "get_all_public_users"))?;

    let headers = pagination_headers(&uri, &page);
    let users = page.items.into_iter().map(PublicUserResponse::from).collect();

    Ok((headers, Json(users)))
}
