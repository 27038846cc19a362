use std::time::Duration;

const ELASTIC_URL: &str = "ELASTIC_URL";
const ELASTIC_USER_INDEX: &str = "ELASTIC_USER_INDEX";
const ELASTIC_TIMEOUT_SECS: &str = "ELASTIC_TIMEOUT_SECS";

const DEFAULT_USER_INDEX: &str = "user";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ElasticConfig {
    /// `None` disables indexing.
    pub base_url: Option<String>,
    pub user_index: String,
    pub timeout: Duration,
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_index: DEFAULT_USER_INDEX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ElasticConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var(ELASTIC_URL)
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let user_index = std::env::var(ELASTIC_USER_INDEX)
            .unwrap_or_else(|_| DEFAULT_USER_INDEX.to_string());
        let timeout_secs: u64 = std::env::var(ELASTIC_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            user_index,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn document_url(&self, user_id: i64) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}/{}/_doc/{}", base, self.user_index, user_id))
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::ElasticConfig;

    #[test]
    fn document_url_uses_index_and_id() {
        let config = ElasticConfig {
            base_url: Some("http://localhost:9200".to_string()),
            ..ElasticConfig::default()
        };
        assert_eq!(
            config.document_url(42).as_deref(),
            Some("http://localhost:9200/user/_doc/42")
        );
    }

    #[test]
    fn unconfigured_has_no_document_url() {
        assert!(ElasticConfig::default().document_url(1).is_none());
    }
}
