use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{query, query_as, query_scalar, MySqlPool};
use crate::entities::NewUser;
use crate::pagination::{PaginationParams, UserSortField};
use crate::repository::models::{PublicUserRow, UserRow};
use crate::repository::errors::UserRepositoryError;
use crate::repository::traits::UserRepositoryTrait;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: &NewUser, authorities: &[String]) -> Result<UserRow, UserRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(UserRepositoryError::from)?;

        let result = query(
            r#"
            INSERT INTO users (login, password_hash, first_name, last_name, email, image_url, activated, lang_key)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&user.login)
        .bind(user.password_hash.expose_secret())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.image_url)
        .bind(user.activated)
        .bind(&user.lang_key)
        .execute(&mut *tx)
        .await
        .map_err(UserRepositoryError::from)?;

        let user_id = i64::try_from(result.last_insert_id())
            .map_err(|e| UserRepositoryError::Sqlx(sqlx::Error::Decode(Box::new(e))))?;

        for authority in authorities {
            query(
                r#"
                INSERT INTO user_authorities (user_id, authority_name)
                VALUES (?, ?)
                "#
            )
            .bind(user_id)
            .bind(authority)
            .execute(&mut *tx)
            .await
            .map_err(UserRepositoryError::from)?;
        }

        let row = query_as::<_, UserRow>(
            r#"
            SELECT id, login, password_hash, first_name, last_name, email, image_url,
                   activated, lang_key, activation_key, reset_key
            FROM users WHERE id = ?
            "#
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(UserRepositoryError::from)?;

        tx.commit().await.map_err(UserRepositoryError::from)?;

        Ok(row)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, login, password_hash, first_name, last_name, email, image_url,
                   activated, lang_key, activation_key, reset_key
            FROM users WHERE login = ?
            "#
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, login, password_hash, first_name, last_name, email, image_url,
                   activated, lang_key, activation_key, reset_key
            FROM users WHERE email = ?
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok(user)
    }

    async fn find_activated_paginated(&self, pagination: &PaginationParams) -> Result<(Vec<PublicUserRow>, u64), UserRepositoryError> {
        // Column names come from UserSortField, never from the request.
        let order_by = pagination.sort.to_order_by(UserSortField::Id);
        let sql = format!(
            "SELECT id, login FROM users WHERE activated = TRUE ORDER BY {order_by} LIMIT ? OFFSET ?"
        );

        let users = query_as::<_, PublicUserRow>(&sql)
            .bind(u64::from(pagination.page_size))
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(UserRepositoryError::from)?;

        let total: i64 = query_scalar(
            r#"
            SELECT COUNT(*) FROM users WHERE activated = TRUE
            "#
        )
        .fetch_one(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok((users, u64::try_from(total).unwrap_or_default()))
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), UserRepositoryError> {
        let result = query(
            r#"
            DELETE FROM users WHERE id = ?
            "#
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(UserRepositoryError::NotFound);
        }

        Ok(())
    }
}
