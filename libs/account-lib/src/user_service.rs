use crate::entities::{NewUser, PaginatedResult, PublicUser, User, PASSWORD_HASH_LENGTH, ROLE_USER};
use crate::errors_service::UserServiceError;
use crate::pagination::PaginationParams;
use crate::repository::models::{AuthorityRow, PublicUserRow, UserRow};
use crate::repository::traits::{
    AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait,
};
use crate::repository::{AuthorityRepository, UserRepository};
use crate::search::ElasticUserSearchRepository;
use std::sync::Arc;
use validator::Validate;

fn user_from_row(row: UserRow, authorities: Vec<AuthorityRow>) -> User {
    User {
        id: row.id,
        login: row.login,
        password_hash: row.password_hash,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        image_url: row.image_url,
        activated: row.activated,
        lang_key: row.lang_key,
        activation_key: row.activation_key,
        reset_key: row.reset_key,
        authorities: authorities.into_iter().map(|a| a.name).collect(),
    }
}

fn public_user_from_row(row: PublicUserRow) -> PublicUser {
    PublicUser {
        id: row.id,
        login: row.login,
    }
}

fn validate_new_user(user: &NewUser) -> Result<(), UserServiceError> {
    user.validate()?;
    if user.password_hash_len() != PASSWORD_HASH_LENGTH {
        return Err(UserServiceError::Validation(format!(
            "password hash must be {PASSWORD_HASH_LENGTH} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct UserService<
    U = UserRepository,
    A = AuthorityRepository,
    S = ElasticUserSearchRepository,
> where
    U: UserRepositoryTrait,
    A: AuthorityRepositoryTrait,
    S: UserSearchRepositoryTrait,
{
    pub user_repo: Arc<U>,
    pub authority_repo: Arc<A>,
    pub search_repo: Arc<S>,
}

impl UserService<UserRepository, AuthorityRepository, ElasticUserSearchRepository> {
    pub fn new(
        user_repo: UserRepository,
        authority_repo: AuthorityRepository,
        search_repo: ElasticUserSearchRepository,
    ) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            authority_repo: Arc::new(authority_repo),
            search_repo: Arc::new(search_repo),
        }
    }
}

impl<U, A, S> UserService<U, A, S>
where
    U: UserRepositoryTrait,
    A: AuthorityRepositoryTrait,
    S: UserSearchRepositoryTrait,
{
    pub fn with_repos(user_repo: Arc<U>, authority_repo: Arc<A>, search_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            authority_repo,
            search_repo,
        }
    }

    async fn load_user(&self, row: UserRow) -> Result<User, UserServiceError> {
        let authorities = self
            .authority_repo
            .get_authorities_for_user(row.id)
            .await
            .map_err(UserServiceError::from)?;
        Ok(user_from_row(row, authorities))
    }

    /// Keeps requested authorities that exist; defaults to `ROLE_USER`.
    async fn resolve_authorities(&self, requested: &[String]) -> Result<Vec<String>, UserServiceError> {
        if requested.is_empty() {
            return Ok(vec![ROLE_USER.to_string()]);
        }

        let known: Vec<String> = self
            .authority_repo
            .get_authorities()
            .await
            .map_err(UserServiceError::from)?
            .into_iter()
            .map(|a| a.name)
            .collect();

        let mut resolved: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            if !known.contains(name) {
                tracing::warn!(authority = %name, "ignoring unknown authority");
            } else if !resolved.contains(name) {
                resolved.push(name.clone());
            }
        }
        Ok(resolved)
    }

    /// Persists a new user, then pushes it to the search index.
    ///
    /// Login and email are stored lower-case. Index failures are logged and
    /// do not undo the database write.
    pub async fn create_user(&self, mut new_user: NewUser) -> Result<User, UserServiceError> {
        validate_new_user(&new_user)?;
        new_user.login = new_user.login.to_lowercase();
        new_user.email = new_user.email.map(|e| e.to_lowercase());

        let authorities = self.resolve_authorities(&new_user.authorities).await?;

        let row = self
            .user_repo
            .create_user(&new_user, &authorities)
            .await
            .map_err(UserServiceError::from)?;
        let user = self.load_user(row).await?;

        if let Err(e) = self.search_repo.index(&user).await {
            tracing::warn!(user_id = user.id, error = %e, "failed to index user");
        }

        tracing::debug!(user_id = user.id, login = %user.login, "created user");
        Ok(user)
    }

    pub async fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserServiceError> {
        let row = self
            .user_repo
            .find_by_login(&login.to_lowercase())
            .await
            .map_err(UserServiceError::from)?;
        match row {
            Some(row) => Ok(Some(self.load_user(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        let row = self
            .user_repo
            .find_by_email(&email.to_lowercase())
            .await
            .map_err(UserServiceError::from)?;
        match row {
            Some(row) => Ok(Some(self.load_user(row).await?)),
            None => Ok(None),
        }
    }

    /// Deletes a user by login and returns what was deleted.
    pub async fn delete_user(&self, login: &str) -> Result<User, UserServiceError> {
        let user = self
            .get_user_by_login(login)
            .await?
            .ok_or(UserServiceError::NotFound)?;

        self.user_repo
            .delete_user(user.id)
            .await
            .map_err(UserServiceError::from)?;

        if let Err(e) = self.search_repo.remove(user.id).await {
            tracing::warn!(user_id = user.id, error = %e, "failed to remove user from index");
        }

        tracing::debug!(user_id = user.id, login = %user.login, "deleted user");
        Ok(user)
    }

    /// Activated users only, projected to the public fields.
    pub async fn get_all_public_users(
        &self,
        pagination: PaginationParams,
    ) -> Result<PaginatedResult<PublicUser>, UserServiceError> {
        let (rows, total) = self
            .user_repo
            .find_activated_paginated(&pagination)
            .await
            .map_err(UserServiceError::from)?;
        Ok(PaginatedResult::new(rows, total, pagination.page, pagination.page_size)
            .map(public_user_from_row))
    }

    pub async fn get_authorities(&self) -> Result<Vec<String>, UserServiceError> {
        let authorities = self
            .authority_repo
            .get_authorities()
            .await
            .map_err(UserServiceError::from)?;
        Ok(authorities.into_iter().map(|a| a.name).collect())
    }
}
