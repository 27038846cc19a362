use std::sync::Arc;

use account_lib::entities::{NewUser, PaginatedResult, PublicUser, User};
use account_lib::errors_service::UserServiceError;
use account_lib::pagination::PaginationParams;
use account_lib::repository::traits::{AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait};
use account_lib::user_service::UserService;

use super::client::RedisCache;
use super::config::CacheConfig;
use super::keys;

/// [`UserService`] with the `usersByLogin` and `usersByEmail` caches in front
/// of the single-user lookups. Listing and authorities are never cached.
#[derive(Debug)]
pub struct CachedUserService<U, A, S>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    inner: Arc<UserService<U, A, S>>,
    cache: RedisCache,
    config: CacheConfig,
}

impl<U, A, S> CachedUserService<U, A, S>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    pub fn new(inner: Arc<UserService<U, A, S>>, cache: RedisCache, config: CacheConfig) -> Self {
        Self {
            inner,
            cache,
            config,
        }
    }

    /// Wraps a service without any cache in front of it.
    pub fn uncached(inner: Arc<UserService<U, A, S>>) -> Self {
        Self::new(inner, RedisCache::disabled(), CacheConfig::default())
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    // ========== Cached reads ==========

    pub async fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserServiceError> {
        if !self.cache.is_enabled() {
            return self.inner.get_user_by_login(login).await;
        }

        let cache_key = keys::user_by_login_key(login);
        if let Some(user) = self.cache.get::<User>(&cache_key).await {
            return Ok(Some(user));
        }

        let result = self.inner.get_user_by_login(login).await?;
        if let Some(ref user) = result {
            self.cache.set(&cache_key, user, self.config.user_ttl).await;
        }
        Ok(result)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        if !self.cache.is_enabled() {
            return self.inner.get_user_by_email(email).await;
        }

        let cache_key = keys::user_by_email_key(email);
        if let Some(user) = self.cache.get::<User>(&cache_key).await {
            return Ok(Some(user));
        }

        let result = self.inner.get_user_by_email(email).await?;
        if let Some(ref user) = result {
            self.cache.set(&cache_key, user, self.config.user_ttl).await;
        }
        Ok(result)
    }

    // ========== Writes ==========

    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        let user = self.inner.create_user(new_user).await?;
        self.evict_user(&user).await;
        Ok(user)
    }

    pub async fn delete_user(&self, login: &str) -> Result<User, UserServiceError> {
        let user = self.inner.delete_user(login).await?;
        self.evict_user(&user).await;
        Ok(user)
    }

    /// Empties both user caches.
    pub async fn clear_user_caches(&self) {
        if !self.cache.is_enabled() {
            return;
        }
        self.cache.delete_pattern(&keys::users_by_login_pattern()).await;
        self.cache.delete_pattern(&keys::users_by_email_pattern()).await;
    }

    async fn evict_user(&self, user: &User) {
        if !self.cache.is_enabled() {
            return;
        }
        self.cache.delete(&keys::user_by_login_key(&user.login)).await;
        if let Some(email) = &user.email {
            self.cache.delete(&keys::user_by_email_key(email)).await;
        }
    }

    // ========== Pass-through ==========

    pub async fn get_all_public_users(
        &self,
        pagination: PaginationParams,
    ) -> Result<PaginatedResult<PublicUser>, UserServiceError> {
        self.inner.get_all_public_users(pagination).await
    }

    pub async fn get_authorities(&self) -> Result<Vec<String>, UserServiceError> {
        self.inner.get_authorities().await
    }
}
