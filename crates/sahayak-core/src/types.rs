//! Core data types shared across store and dispatcher.

use chrono::{DateTime, Utc};
use sahayak_config::Language;
use serde::{Deserialize, Serialize};

/// Free-form preference mapping stored per session.
pub type PreferenceMap = serde_json::Map<String, serde_json::Value>;

/// Preference key holding the preferred job category.
pub const PREF_CATEGORY: &str = "preferred_category";
/// Preference key holding the preferred language code.
pub const PREF_LANGUAGE: &str = "preferred_language";

/// One query/response pair recorded against a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnRecord {
    /// Owning session identifier.
    pub session_id: String,
    /// User query text.
    pub query: String,
    /// Assistant response text.
    pub response: String,
    /// Language the turn was answered in.
    pub language: Language,
    /// Free-text input tag, e.g. "text" or "voice".
    pub query_type: String,
    /// Timestamp for the turn.
    pub created_at: DateTime<Utc>,
}

/// One inbound chat exchange for the dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// User query text.
    pub query: String,
    /// Session identifier the turn belongs to.
    pub session_id: String,
    /// Caller-supplied language code, if any.
    pub language: Option<String>,
    /// Input tag recorded on the turn.
    #[serde(default = "default_input_type")]
    pub input_type: String,
}

/// Default input tag for turns.
pub fn default_input_type() -> String {
    "text".to_string()
}

impl QueryRequest {
    /// Build a plain text request without a language hint.
    pub fn text(query: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: session_id.into(),
            language: None,
            input_type: default_input_type(),
        }
    }

    /// Attach a caller-supplied language code.
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }
}

/// Structured result of one dispatched exchange.
///
/// Always well-formed: failures along the way surface through
/// `response` text and the `error` field, never as a missing body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryOutcome {
    /// Assistant response text.
    pub response: String,
    /// Language the exchange resolved to.
    pub language: Language,
    /// Echoed session identifier.
    pub session_id: String,
    /// Echoed input tag.
    pub input_type: String,
    /// Completion timestamp.
    pub timestamp: DateTime<Utc>,
    /// Error detail when the exchange degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{QueryOutcome, QueryRequest};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use sahayak_config::Language;

    #[test]
    fn text_request_defaults_input_type() {
        let request = QueryRequest::text("hello", "s1");
        assert_eq!(request.input_type, "text".to_string());
        assert_eq!(request.language, None);
    }

    #[test]
    fn outcome_omits_error_field_when_absent() {
        let outcome = QueryOutcome {
            response: "hi".to_string(),
            language: Language::En,
            session_id: "s1".to_string(),
            input_type: "text".to_string(),
            timestamp: Utc::now(),
            error: None,
        };
        let value = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(value.get("error"), None);
        assert_eq!(value["language"], serde_json::json!("en"));
    }
}
