use crate::constants::{CACHE_ENABLED, CACHE_USER_TTL_SECS, REDIS_DB, REDIS_HOST, REDIS_PORT};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool,
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_db: i64,
    pub user_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            redis_db: 0,
            user_ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let default = Self::default();

        let enabled = std::env::var(CACHE_ENABLED)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(default.enabled);

        let redis_host = std::env::var(REDIS_HOST).unwrap_or(default.redis_host);

        let redis_port = std::env::var(REDIS_PORT)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.redis_port);

        let redis_db = std::env::var(REDIS_DB)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.redis_db);

        let user_ttl = std::env::var(CACHE_USER_TTL_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default.user_ttl);

        Self {
            enabled,
            redis_host,
            redis_port,
            redis_db,
            user_ttl,
        }
    }

    pub fn redis_url(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.redis_host, self.redis_port, self.redis_db
        )
    }
}
