use utoipa::OpenApi;

use crate::methods::entities::PublicUserResponse;
use crate::methods::get_authorities::__path_get_authorities;
use crate::methods::get_public_users::__path_get_all_public_users;
use crate::methods::health_check::__path_health_check;

#[derive(OpenApi)]
#[openapi(
    paths(get_all_public_users, get_authorities, health_check),
    components(schemas(PublicUserResponse)),
    tags(
        (name = "users", description = "Public user endpoints"),
        (name = "service", description = "Service endpoints")
    )
)]
pub struct ApiDoc;
