//! Configuration models and environment loading.
//!
//! This crate owns the assistant config schema, the supported language
//! set, and the env-var loader used by the server binary.

mod error;
mod language;
mod model;

/// Public error type returned by config loading APIs.
pub use error::ConfigError;
/// Supported language set and helpers.
pub use language::Language;
/// Configuration schema models.
pub use model::*;
