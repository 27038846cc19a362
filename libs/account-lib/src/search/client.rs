use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::config::ElasticConfig;
use super::errors::SearchError;
use super::models::UserDocument;
use crate::entities::User;
use crate::repository::traits::UserSearchRepositoryTrait;

/// Keeps the Elasticsearch user index in step with the database.
#[derive(Clone)]
pub struct ElasticUserSearchRepository {
    config: ElasticConfig,
    http: Client,
}

impl std::fmt::Debug for ElasticUserSearchRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticUserSearchRepository")
            .field("configured", &self.config.is_configured())
            .field("user_index", &self.config.user_index)
            .finish()
    }
}

impl ElasticUserSearchRepository {
    pub fn new(config: ElasticConfig) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        if !config.is_configured() {
            tracing::info!("Search index disabled: no ELASTIC_URL configured");
        }
        Ok(Self { config, http })
    }

    pub fn disabled() -> Self {
        Self {
            config: ElasticConfig::default(),
            http: Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_configured()
    }
}

#[async_trait]
impl UserSearchRepositoryTrait for ElasticUserSearchRepository {
    async fn index(&self, user: &User) -> Result<(), SearchError> {
        let Some(url) = self.config.document_url(user.id) else {
            tracing::debug!(user_id = user.id, "Search index disabled, skipping index");
            return Ok(());
        };

        let response = self
            .http
            .put(&url)
            .json(&UserDocument::from(user))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                tracing::debug!(user_id = user.id, "User indexed");
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SearchError::UnexpectedStatus(status.as_u16(), body))
            }
        }
    }

    async fn remove(&self, user_id: i64) -> Result<(), SearchError> {
        let Some(url) = self.config.document_url(user_id) else {
            tracing::debug!(user_id = user_id, "Search index disabled, skipping removal");
            return Ok(());
        };

        let response = self.http.delete(&url).send().await?;

        match response.status() {
            // Already absent from the index.
            StatusCode::OK | StatusCode::NOT_FOUND => {
                tracing::debug!(user_id = user_id, "User removed from index");
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SearchError::UnexpectedStatus(status.as_u16(), body))
            }
        }
    }
}
