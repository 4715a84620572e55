use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl DraftError {
    /// Whether the caller may retry the data fetch or fall back to
    /// neutral defaults. Invalid requests are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DraftError::DataUnavailable(_))
    }
}
