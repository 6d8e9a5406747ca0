use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The service answered, but has no such record
    #[error("not found: {0}")]
    NotFound(String),

    #[error("request was rejected as unauthorized; check the configured API key")]
    Unauthorized,

    #[error("service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}
