use async_trait::async_trait;

use crate::entities::{NewUser, User};
use crate::pagination::PaginationParams;
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::{AuthorityRow, PublicUserRow, UserRow};
use crate::search::SearchError;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts the user and its authority links in one transaction.
    async fn create_user(&self, user: &NewUser, authorities: &[String]) -> Result<UserRow, UserRepositoryError>;
    async fn find_by_login(&self, login: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn find_activated_paginated(&self, pagination: &PaginationParams) -> Result<(Vec<PublicUserRow>, u64), UserRepositoryError>;
    async fn delete_user(&self, user_id: i64) -> Result<(), UserRepositoryError>;
}

#[async_trait]
pub trait AuthorityRepositoryTrait: Send + Sync {
    async fn get_authorities(&self) -> Result<Vec<AuthorityRow>, UserRepositoryError>;
    async fn get_authorities_for_user(&self, user_id: i64) -> Result<Vec<AuthorityRow>, UserRepositoryError>;
}

#[async_trait]
pub trait UserSearchRepositoryTrait: Send + Sync {
    async fn index(&self, user: &User) -> Result<(), SearchError>;
    async fn remove(&self, user_id: i64) -> Result<(), SearchError>;
}
