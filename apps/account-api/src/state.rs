use std::sync::Arc;
use account_lib::repository::traits::{AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait};
use account_lib::repository::{AuthorityRepository, UserRepository};
use account_lib::search::ElasticUserSearchRepository;

use crate::cache::CachedUserService;
use crate::error::is_prod_like;

pub struct AppState<U = UserRepository, A = AuthorityRepository, S = ElasticUserSearchRepository>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    pub user_service: Arc<CachedUserService<U, A, S>>,
    pub env: String,
}

// Manual impl: the repositories themselves need not be Clone.
impl<U, A, S> Clone for AppState<U, A, S>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            env: self.env.clone(),
        }
    }
}

impl<U, A, S> AppState<U, A, S>
where
    U: UserRepositoryTrait + 'static,
    A: AuthorityRepositoryTrait + 'static,
    S: UserSearchRepositoryTrait + 'static,
{
    pub fn new(user_service: CachedUserService<U, A, S>, env: impl Into<String>) -> Self {
        Self {
            user_service: Arc::new(user_service),
            env: env.into(),
        }
    }

    pub fn is_prod_like(&self) -> bool {
        is_prod_like(&self.env)
    }
}
