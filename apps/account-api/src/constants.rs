pub const SERVICE: &str = "account-api";
pub const ENV: &str = "ENV";

pub const LOCAL_ENV: &str = "local";

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_CONNECT_RETRIES: u32 = 10;

pub const ACCOUNT_API_PORT: &str = "ACCOUNT_API_PORT";
pub const DEFAULT_PORT: u16 = 8080;

// Redis configuration
pub const REDIS_HOST: &str = "REDIS_HOST";
pub const REDIS_PORT: &str = "REDIS_PORT";
pub const REDIS_DB: &str = "REDIS_DB";

// Cache configuration
pub const CACHE_ENABLED: &str = "CACHE_ENABLED";
pub const CACHE_USER_TTL_SECS: &str = "CACHE_USER_TTL_SECS";

// Middleware configuration
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
pub const MAX_BODY_SIZE_BYTES: &str = "MAX_BODY_SIZE_BYTES";
pub const SHUTDOWN_TIMEOUT_SECS: &str = "SHUTDOWN_TIMEOUT_SECS";

// Response headers
pub const X_TOTAL_COUNT: &str = "x-total-count";
pub const X_REQUEST_ID: &str = "x-request-id";
