mod client;
mod config;
mod errors;
mod models;

pub use client::ElasticUserSearchRepository;
pub use config::ElasticConfig;
pub use errors::SearchError;
pub use models::UserDocument;
