mod client;
mod config;
pub mod keys;
mod service;

pub use client::RedisCache;
pub use config::CacheConfig;
pub use service::CachedUserService;
