use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use account_lib::repository::{AuthorityRepository, UserRepository};
use account_lib::search::{ElasticConfig, ElasticUserSearchRepository};
use account_lib::user_service::UserService;
use account_lib::util::{connect_with_retry, MIGRATOR};

use account_api::cache::{CacheConfig, CachedUserService, RedisCache};
use account_api::config::MiddlewareConfig;
use account_api::constants::{
    ACCOUNT_API_PORT, DATABASE_CONNECT_RETRIES, DATABASE_URL, DEFAULT_PORT, ENV, LOCAL_ENV,
    SERVICE, X_REQUEST_ID, X_TOTAL_COUNT,
};
use account_api::router::app_router;
use account_api::shutdown::shutdown_signal;
use account_api::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }

    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    // Database
    let database_url = std::env::var(DATABASE_URL)
        .map(SecretString::new)
        .map_err(|_| format!("{} environment variable must be set", DATABASE_URL))?;

    let pool = connect_with_retry(database_url.expose_secret(), DATABASE_CONNECT_RETRIES).await?;
    MIGRATOR.run(&pool).await?;
    tracing::info!("database migrations applied");

    // Search index
    let search_repo = ElasticUserSearchRepository::new(ElasticConfig::from_env())?;

    // Cache
    let cache_config = CacheConfig::from_env();
    let cache = RedisCache::new(&cache_config).await;
    tracing::info!(
        cache_enabled = cache.is_enabled(),
        user_ttl_secs = cache_config.user_ttl.as_secs(),
        "cache configuration loaded"
    );

    let user_service = UserService::new(
        UserRepository::new(pool.clone()),
        AuthorityRepository::new(pool.clone()),
        search_repo,
    );
    let cached_service = CachedUserService::new(Arc::new(user_service), cache, cache_config);

    let app_state = AppState::new(cached_service, env.clone());
    let mut app = app_router(app_state);

    // ============================================
    // Middleware stack (applied inner to outer)
    // Order: Request → Timeout → CORS → Body Limit → Request ID → Trace → Handler
    // ============================================

    // 1. Trace layer (innermost - closest to handler)
    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    // 2. Request ID layers
    let x_request_id = HeaderName::from_static(X_REQUEST_ID);
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    // 3. Body limit layer
    app = app.layer(RequestBodyLimitLayer::new(middleware_config.max_body_size));

    // 4. CORS layer (read-only API)
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id])
        .expose_headers([header::LINK, HeaderName::from_static(X_TOTAL_COUNT)]);
    let cors_layer = if middleware_config.allows_any_origin() {
        cors_layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = middleware_config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors_layer.allow_origin(origins)
    };
    app = app.layer(cors_layer);

    // 5. Timeout layer (returns 408 Request Timeout)
    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        middleware_config.request_timeout,
    ));

    let port: u16 = std::env::var(ACCOUNT_API_PORT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let public_url = format!("http://127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("{} is ready to accept requests at: {}", SERVICE, public_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(middleware_config.shutdown_timeout))
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
