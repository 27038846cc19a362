use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, MAX_BODY_SIZE_BYTES, REQUEST_TIMEOUT_SECS, SHUTDOWN_TIMEOUT_SECS,
};

/// Split a comma-separated origin list, dropping blanks.
fn parse_origin_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        let default = Self::default();

        let request_timeout = std::env::var(REQUEST_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default.request_timeout);

        let max_body_size = std::env::var(MAX_BODY_SIZE_BYTES)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default.max_body_size);

        let shutdown_timeout = std::env::var(SHUTDOWN_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default.shutdown_timeout);

        let cors_allowed_origins = std::env::var(CORS_ALLOWED_ORIGINS)
            .ok()
            .map(|v| parse_origin_list(&v))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            request_timeout,
            max_body_size,
            shutdown_timeout,
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}
