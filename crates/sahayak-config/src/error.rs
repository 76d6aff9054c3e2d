//! Error types for config loading.

use thiserror::Error;

/// Errors returned while loading config from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An env var was set but could not be parsed into its field type.
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

impl ConfigError {
    /// Build an `InvalidValue` error for the given env var.
    pub fn invalid(var: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            var: var.to_string(),
            message: message.into(),
        }
    }
}
