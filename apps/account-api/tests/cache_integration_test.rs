use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor}, runners::AsyncRunner, ContainerAsync, GenericImage
};

use account_lib::entities::{NewUser, User, ROLE_USER};
use account_lib::pagination::PaginationParams;
use account_lib::repository::errors::UserRepositoryError;
use account_lib::repository::models::{AuthorityRow, PublicUserRow, UserRow};
use account_lib::repository::traits::{AuthorityRepositoryTrait, UserRepositoryTrait, UserSearchRepositoryTrait};
use account_lib::search::SearchError;
use account_lib::user_service::UserService;

use account_api::cache::keys::{user_by_email_key, user_by_login_key};
use account_api::cache::{CacheConfig, CachedUserService, RedisCache};

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
        async fn create_user(&self, user: &NewUser, authorities: &[String]) -> Result<UserRow, UserRepositoryError>;
        async fn find_by_login(&self, login: &str) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn find_activated_paginated(&self, pagination: &PaginationParams) -> Result<(Vec<PublicUserRow>, u64), UserRepositoryError>;
        async fn delete_user(&self, user_id: i64) -> Result<(), UserRepositoryError>;
    }
}

mock! {
    pub AuthorityRepo {}

    #[async_trait]
    impl AuthorityRepositoryTrait for AuthorityRepo {
        async fn get_authorities(&self) -> Result<Vec<AuthorityRow>, UserRepositoryError>;
        async fn get_authorities_for_user(&self, user_id: i64) -> Result<Vec<AuthorityRow>, UserRepositoryError>;
    }
}

mock! {
    pub UserSearchRepo {}

    #[async_trait]
    impl UserSearchRepositoryTrait for UserSearchRepo {
        async fn index(&self, user: &User) -> Result<(), SearchError>;
        async fn remove(&self, user_id: i64) -> Result<(), SearchError>;
    }
}

const DEFAULT_LOGIN: &str = "johndoe";
const DEFAULT_EMAIL: &str = "johndoe@example.com";

type TestService = CachedUserService<MockUserRepo, MockAuthorityRepo, MockUserSearchRepo>;

async fn start_redis() -> (ContainerAsync<GenericImage>, CacheConfig) {
    let container = GenericImage::new("redis", "7")
        .with_exposed_port(6379.tcp())
        .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
        .start()
        .await
        .expect("Failed to start Redis container");

    let port = container.get_host_port_ipv4(6379)
                        .await
                        .expect("Failed to get Redis port");

    let config = CacheConfig {
        enabled: true,
        redis_host: "localhost".to_string(),
        redis_port: port,
        redis_db: 0,
        user_ttl: Duration::from_secs(60),
    };

    (container, config)
}

async fn create_cached_service(
    config: &CacheConfig,
    user_repo: MockUserRepo,
    authority_repo: MockAuthorityRepo,
    search_repo: MockUserSearchRepo,
) -> TestService {
    let inner = UserService::with_repos(
        Arc::new(user_repo),
        Arc::new(authority_repo),
        Arc::new(search_repo),
    );
    let cache = RedisCache::new(config).await;
    assert!(cache.is_enabled(), "Redis cache should be connected");
    CachedUserService::new(Arc::new(inner), cache, config.clone())
}

fn user_row(id: i64, login: &str, email: &str) -> UserRow {
    UserRow {
        id,
        login: login.to_string(),
        password_hash: "x".repeat(60),
        first_name: Some("john".to_string()),
        last_name: Some("doe".to_string()),
        email: Some(email.to_string()),
        image_url: None,
        activated: true,
        lang_key: Some("en".to_string()),
        activation_key: None,
        reset_key: None,
    }
}

fn cached_user(id: i64, login: &str, email: &str) -> User {
    User {
        id,
        login: login.to_string(),
        password_hash: "x".repeat(60),
        first_name: None,
        last_name: None,
        email: Some(email.to_string()),
        image_url: None,
        activated: true,
        lang_key: None,
        activation_key: None,
        reset_key: None,
        authorities: vec![ROLE_USER.to_string()],
    }
}

fn user_authorities() -> Vec<AuthorityRow> {
    vec![AuthorityRow { name: ROLE_USER.to_string() }]
}

#[tokio::test]
async fn integration_login_lookup_is_read_through() {
    let (_container, config) = start_redis().await;

    let mut user_repo = MockUserRepo::new();
    let mut authority_repo = MockAuthorityRepo::new();
    user_repo
        .expect_find_by_login()
        .withf(|login| login == DEFAULT_LOGIN)
        .times(1)
        .returning(|_| Ok(Some(user_row(3, DEFAULT_LOGIN, DEFAULT_EMAIL))));
    authority_repo
        .expect_get_authorities_for_user()
        .times(1)
        .returning(|_| Ok(user_authorities()));

    let service = create_cached_service(&config, user_repo, authority_repo, MockUserSearchRepo::new()).await;

    let first = service.get_user_by_login(DEFAULT_LOGIN).await.unwrap().unwrap();
    let second = service.get_user_by_login("JohnDoe").await.unwrap().unwrap();
    assert_eq!(first, second);

    let inspector = RedisCache::new(&config).await;
    let stored: Option<User> = inspector.get(&user_by_login_key(DEFAULT_LOGIN)).await;
    assert_eq!(stored, Some(first));
}

#[tokio::test]
async fn integration_delete_evicts_login_and_email_entries() {
    let (_container, config) = start_redis().await;

    let mut user_repo = MockUserRepo::new();
    let mut authority_repo = MockAuthorityRepo::new();
    let mut search_repo = MockUserSearchRepo::new();

    // One read through the cache, one inside delete_user.
    user_repo
        .expect_find_by_login()
        .times(2)
        .returning(|_| Ok(Some(user_row(3, DEFAULT_LOGIN, DEFAULT_EMAIL))));
    user_repo
        .expect_find_by_email()
        .times(1)
        .returning(|_| Ok(Some(user_row(3, DEFAULT_LOGIN, DEFAULT_EMAIL))));
    authority_repo
        .expect_get_authorities_for_user()
        .returning(|_| Ok(user_authorities()));
    user_repo
        .expect_delete_user()
        .withf(|id| *id == 3)
        .times(1)
        .returning(|_| Ok(()));
    search_repo.expect_remove().times(1).returning(|_| Ok(()));

    let service = create_cached_service(&config, user_repo, authority_repo, search_repo).await;
    let inspector = RedisCache::new(&config).await;

    service.get_user_by_login(DEFAULT_LOGIN).await.unwrap();
    service.get_user_by_email(DEFAULT_EMAIL).await.unwrap();
    assert!(inspector.get::<User>(&user_by_login_key(DEFAULT_LOGIN)).await.is_some());
    assert!(inspector.get::<User>(&user_by_email_key(DEFAULT_EMAIL)).await.is_some());

    service.delete_user(DEFAULT_LOGIN).await.unwrap();

    assert!(inspector.get::<User>(&user_by_login_key(DEFAULT_LOGIN)).await.is_none());
    assert!(inspector.get::<User>(&user_by_email_key(DEFAULT_EMAIL)).await.is_none());
}

#[tokio::test]
async fn integration_create_evicts_stale_entries() {
    let (_container, config) = start_redis().await;

    let mut user_repo = MockUserRepo::new();
    let mut authority_repo = MockAuthorityRepo::new();
    let mut search_repo = MockUserSearchRepo::new();

    user_repo
        .expect_create_user()
        .times(1)
        .returning(|_, _| Ok(user_row(4, DEFAULT_LOGIN, DEFAULT_EMAIL)));
    authority_repo
        .expect_get_authorities_for_user()
        .returning(|_| Ok(user_authorities()));
    search_repo.expect_index().times(1).returning(|_| Ok(()));

    let service = create_cached_service(&config, user_repo, authority_repo, search_repo).await;
    let inspector = RedisCache::new(&config).await;

    let stale = cached_user(1, DEFAULT_LOGIN, DEFAULT_EMAIL);
    inspector.set(&user_by_login_key(DEFAULT_LOGIN), &stale, config.user_ttl).await;
    inspector.set(&user_by_email_key(DEFAULT_EMAIL), &stale, config.user_ttl).await;

    let mut new_user = NewUser::new(DEFAULT_LOGIN, "x".repeat(60));
    new_user.email = Some(DEFAULT_EMAIL.to_string());
    new_user.activated = true;
    let created = service.create_user(new_user).await.unwrap();
    assert_eq!(created.id, 4);

    assert!(inspector.get::<User>(&user_by_login_key(DEFAULT_LOGIN)).await.is_none());
    assert!(inspector.get::<User>(&user_by_email_key(DEFAULT_EMAIL)).await.is_none());
}

#[tokio::test]
async fn integration_clear_user_caches_empties_both_caches() {
    let (_container, config) = start_redis().await;

    let service = create_cached_service(
        &config,
        MockUserRepo::new(),
        MockAuthorityRepo::new(),
        MockUserSearchRepo::new(),
    )
    .await;
    let inspector = RedisCache::new(&config).await;

    let users = [
        cached_user(1, "admin", "admin@example.com"),
        cached_user(2, "user", "user@example.com"),
    ];
    for user in &users {
        let email = user.email.as_deref().unwrap();
        inspector.set(&user_by_login_key(&user.login), user, config.user_ttl).await;
        inspector.set(&user_by_email_key(email), user, config.user_ttl).await;
    }
    assert!(inspector.get::<User>(&user_by_login_key("admin")).await.is_some());

    service.clear_user_caches().await;

    for user in &users {
        let email = user.email.as_deref().unwrap();
        assert!(inspector.get::<User>(&user_by_login_key(&user.login)).await.is_none());
        assert!(inspector.get::<User>(&user_by_email_key(email)).await.is_none());
    }
}
