#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// HTTP request could not be sent or completed
    #[error("search request failed: {0}")]
    RequestFailed(String),
    /// Index answered with a non-success status
    #[error("search index returned status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::RequestFailed(err.to_string())
    }
}
