use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use account_lib::entities::PublicUser;
use account_lib::pagination::{PaginationParams, Sort, SortError};

/// Query string of the public user listing.
///
/// `sort` may repeat: `?sort=lastName,asc&sort=id,desc`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicUsersQuery {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size, 20 by default and at most 2000.
    pub size: Option<u32>,
    /// `property[,property...][,asc|desc]`
    #[serde(default)]
    pub sort: Vec<String>,
}

impl PublicUsersQuery {
    pub fn into_pagination(self) -> Result<PaginationParams, SortError> {
        let sort = Sort::parse(&self.sort)?;
        Ok(PaginationParams::new(self.page, self.size, sort))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: i64,
    pub login: String,
}

impl From<PublicUser> for PublicUserResponse {
    fn from(user: PublicUser) -> Self {
        PublicUserResponse {
            id: user.id,
            login: user.login,
        }
    }
}
