//! Error types for the core crate.

use thiserror::Error;

/// Errors returned by session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// History limit must be a positive integer.
    #[error("invalid history limit: {0}")]
    InvalidLimit(i64),
    /// Preference map could not be serialized.
    #[error("preference serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this error should surface as a client error at the
    /// HTTP boundary.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::InvalidLimit(_))
    }
}

/// Errors returned by the generation provider.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API credential was configured.
    #[error("generation credentials are not configured")]
    MissingCredentials,
    /// The outbound request failed.
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("generation service returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The service answered without any candidate text.
    #[error("generation service returned no candidates")]
    EmptyCandidates,
}
