use async_trait::async_trait;
use sqlx::{query_as, MySqlPool};

use crate::repository::errors::{map_sqlx_error, UserRepositoryError};
use crate::repository::models::AuthorityRow;
use crate::repository::traits::AuthorityRepositoryTrait;

#[derive(Debug, Clone)]
pub struct AuthorityRepository {
    pub pool: MySqlPool,
}

impl AuthorityRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorityRepositoryTrait for AuthorityRepository {
    async fn get_authorities(&self) -> Result<Vec<AuthorityRow>, UserRepositoryError> {
        let authorities = query_as::<_, AuthorityRow>(
            r#"
            SELECT name FROM authorities ORDER BY name
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(authorities)
    }

    async fn get_authorities_for_user(&self, user_id: i64) -> Result<Vec<AuthorityRow>, UserRepositoryError> {
        let authorities = query_as::<_, AuthorityRow>(
            r#"
            SELECT a.name
            FROM authorities a
            INNER JOIN user_authorities ua ON ua.authority_name = a.name
            WHERE ua.user_id = ?
            ORDER BY a.name
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(authorities)
    }
}
