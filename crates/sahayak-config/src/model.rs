//! Configuration schema for the assistant.

use crate::error::ConfigError;
use crate::language::Language;
use log::warn;
use serde::{Deserialize, Serialize};

/// Job categories used by the static posting catalog and preference
/// filtering.
pub const JOB_CATEGORIES: [&str; 10] = [
    "Government Jobs",
    "Private Sector",
    "Skill Development",
    "Foreign Counseling",
    "Education",
    "Healthcare",
    "Technology",
    "Agriculture",
    "Banking",
    "Defense",
];

/// Root config for the assistant server.
///
/// Loaded once at startup from the environment; every field has a
/// working default so a bare process comes up in degraded mode rather
/// than refusing to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API key for the hosted generation service. Empty means the
    /// generation capability is unavailable and chat degrades.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model name passed to the generation endpoint.
    pub model: String,
    /// Maximum output tokens requested per generation call.
    pub max_output_tokens: u32,
    /// Sampling temperature for generation.
    pub temperature: f32,
    /// Language used when the caller supplies none or an unsupported code.
    pub default_language: Language,
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Maximum job recommendations appended to a chat response.
    pub max_recommendations: usize,
    /// Optional per-session turn cap; `None` keeps history unbounded.
    pub history_retain_turns: Option<usize>,
    /// Application name reported by the status endpoint.
    pub app_name: String,
    /// Application version reported by the status endpoint.
    pub app_version: String,
    /// Origins allowed by CORS; empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            default_language: Language::En,
            db_path: default_db_path(),
            max_recommendations: default_max_recommendations(),
            history_retain_turns: None,
            app_name: default_app_name(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Default generation model name.
fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

/// Default max output tokens per generation call.
fn default_max_output_tokens() -> u32 {
    1024
}

/// Default sampling temperature.
fn default_temperature() -> f32 {
    0.7
}

/// Default SQLite database path.
fn default_db_path() -> String {
    "chatbot.db".to_string()
}

/// Default recommendation count cap.
fn default_max_recommendations() -> usize {
    5
}

/// Default application name.
fn default_app_name() -> String {
    "Sahayak Digital Assistant".to_string()
}

impl ServerConfig {
    /// Load config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load config through an injectable env lookup. Used directly by
    /// tests; `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_language = match lookup("DEFAULT_LANGUAGE") {
            Some(code) => match Language::parse(&code) {
                Some(language) => language,
                None => {
                    warn!("unsupported DEFAULT_LANGUAGE '{code}', using 'en'");
                    Language::En
                }
            },
            None => defaults.default_language,
        };

        Ok(Self {
            api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.model),
            max_output_tokens: parse_var(
                &lookup,
                "MAX_TOKENS",
                defaults.max_output_tokens,
            )?,
            temperature: parse_var(&lookup, "TEMPERATURE", defaults.temperature)?,
            default_language,
            db_path: lookup("SQLITE_DB_PATH").unwrap_or(defaults.db_path),
            max_recommendations: parse_var(
                &lookup,
                "MAX_JOB_RECOMMENDATIONS",
                defaults.max_recommendations,
            )?,
            history_retain_turns: match lookup("HISTORY_RETAIN_TURNS") {
                Some(raw) => {
                    let retain: usize = parse_raw("HISTORY_RETAIN_TURNS", &raw)?;
                    if retain == 0 {
                        return Err(ConfigError::invalid(
                            "HISTORY_RETAIN_TURNS",
                            "must be a positive turn count",
                        ));
                    }
                    Some(retain)
                }
                None => None,
            },
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            app_version: lookup("APP_VERSION").unwrap_or(defaults.app_version),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Whether a generation credential is present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Parse an optional env var, falling back to the default when unset.
fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => parse_raw(var, &raw),
        None => Ok(default),
    }
}

/// Parse a raw env value, surfacing the parse failure with the var name.
fn parse_raw<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err: T::Err| ConfigError::invalid(var, err.to_string()))
}
