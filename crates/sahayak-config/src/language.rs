//! The closed set of languages the assistant answers in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the assistant responds in.
///
/// Requests carrying any other code fall back to the configured
/// default rather than failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Hindi.
    Hi,
    /// Punjabi.
    Pa,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Pa];

    /// Return the language as its ISO 639-1 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Pa => "pa",
        }
    }

    /// Parse a language code, returning `None` for unsupported codes.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "pa" => Some(Language::Pa),
            _ => None,
        }
    }

    /// Human-readable name shown in status payloads.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Pa => "Punjabi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Language::parse(code).ok_or(())
    }
}
