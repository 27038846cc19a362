use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub activated: bool,
    pub lang_key: Option<String>,
    pub activation_key: Option<String>,
    pub reset_key: Option<String>,
}

/// Only the columns the public listing is allowed to return.
#[derive(Debug, Clone, FromRow)]
pub struct PublicUserRow {
    pub id: i64,
    pub login: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AuthorityRow {
    pub name: String,
}
