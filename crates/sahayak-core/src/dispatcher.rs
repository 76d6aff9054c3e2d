//! End-to-end query dispatch: language resolution, retrieval,
//! generation, recommendation injection, and best-effort persistence.

use crate::jobs::{self, JobPosting};
use crate::prompt::build_prompt;
use crate::provider::{GenerationParams, GenerationProvider};
use crate::retrieval::{ContextRetriever, NoopRetriever};
use crate::store::SessionStore;
use crate::types::{PREF_CATEGORY, PreferenceMap, QueryOutcome, QueryRequest, TurnRecord};
use chrono::Utc;
use log::{error, info, warn};
use sahayak_config::Language;
use std::sync::Arc;

/// Fixed reply used when the generation capability fails or is absent.
pub const APOLOGY_REPLY: &str =
    "I apologize, but I'm having trouble generating a response at the moment.";
/// Fixed reply for empty queries.
pub const EMPTY_QUERY_REPLY: &str = "Please provide a question.";

/// Documents requested from the retrieval seam per exchange.
const RETRIEVAL_K: usize = 3;

/// Orchestrates one "ask a question, get an answer" exchange.
///
/// Constructed once at startup and shared across request handlers;
/// every collaborator is injected so provider variants stay swappable.
pub struct Dispatcher {
    store: Arc<SessionStore>,
    generation: Option<Arc<dyn GenerationProvider>>,
    retriever: Arc<dyn ContextRetriever>,
    params: GenerationParams,
    default_language: Language,
    max_recommendations: usize,
}

impl Dispatcher {
    /// Build a dispatcher with the default (noop) retrieval backend.
    pub fn new(
        store: Arc<SessionStore>,
        generation: Option<Arc<dyn GenerationProvider>>,
        params: GenerationParams,
        default_language: Language,
        max_recommendations: usize,
    ) -> Self {
        Self {
            store,
            generation,
            retriever: Arc::new(NoopRetriever),
            params,
            default_language,
            max_recommendations,
        }
    }

    /// Replace the retrieval backend.
    pub fn with_retriever(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = retriever;
        self
    }

    /// Whether the generation capability is wired in.
    pub fn generation_available(&self) -> bool {
        self.generation.is_some()
    }

    /// Process one exchange end to end.
    ///
    /// Never fails: every degraded path yields a well-formed outcome
    /// with the `error` field set.
    pub async fn process_query(&self, request: &QueryRequest) -> QueryOutcome {
        let language = self.resolve_language(request.language.as_deref());

        if request.query.trim().is_empty() {
            return self.outcome(
                request,
                language,
                EMPTY_QUERY_REPLY.to_string(),
                Some("empty query".to_string()),
            );
        }
        info!(
            "processing query (session_id={}, language={}, query_len={})",
            request.session_id,
            language,
            request.query.len()
        );

        let documents = self
            .retriever
            .similar_documents(&request.query, RETRIEVAL_K)
            .await;
        let prompt = build_prompt(language, &documents, &request.query);

        let (mut response, mut error) = match &self.generation {
            Some(provider) => match provider.generate(&prompt, &self.params).await {
                Ok(text) => (text, None),
                Err(err) => {
                    error!(
                        "generation failed (session_id={}, err={})",
                        request.session_id, err
                    );
                    (APOLOGY_REPLY.to_string(), Some(err.to_string()))
                }
            },
            None => (
                APOLOGY_REPLY.to_string(),
                Some("generation capability unavailable".to_string()),
            ),
        };

        if jobs::mentions_jobs(&request.query) {
            let postings = self.recommend_jobs(&request.session_id, None);
            if !postings.is_empty() {
                response.push_str(&jobs::format_block(&postings));
            }
        }

        let turn = TurnRecord {
            session_id: request.session_id.clone(),
            query: request.query.clone(),
            response: response.clone(),
            language,
            query_type: request.input_type.clone(),
            created_at: Utc::now(),
        };
        // Availability over durability: a failed write must not fail
        // the exchange.
        if let Err(err) = self.store.append_turn(&turn) {
            error!(
                "failed to persist turn (session_id={}, err={})",
                request.session_id, err
            );
            error.get_or_insert_with(|| format!("turn not persisted: {err}"));
        }

        self.outcome(request, language, response, error)
    }

    /// Recommendations for a session, honoring the stored preferred
    /// category unless an override is given.
    pub fn recommend_jobs(
        &self,
        session_id: &str,
        category_override: Option<&str>,
    ) -> Vec<JobPosting> {
        let category = match category_override {
            Some(category) => Some(category.to_string()),
            None => self
                .session_preferences(session_id)
                .get(PREF_CATEGORY)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        };
        jobs::recommend(category.as_deref(), self.max_recommendations)
    }

    /// Read preferences, degrading to an empty mapping on store errors.
    fn session_preferences(&self, session_id: &str) -> PreferenceMap {
        match self.store.preferences(session_id) {
            Ok(preferences) => preferences,
            Err(err) => {
                error!(
                    "failed to read preferences (session_id={}, err={})",
                    session_id, err
                );
                PreferenceMap::new()
            }
        }
    }

    /// Resolve the effective language: supported caller-supplied code,
    /// else the configured default. Detection is deliberately not part
    /// of this policy.
    fn resolve_language(&self, requested: Option<&str>) -> Language {
        match requested {
            Some(code) => match Language::parse(code) {
                Some(language) => language,
                None => {
                    warn!(
                        "unsupported language '{}', falling back to {}",
                        code, self.default_language
                    );
                    self.default_language
                }
            },
            None => self.default_language,
        }
    }

    /// Assemble a well-formed outcome.
    fn outcome(
        &self,
        request: &QueryRequest,
        language: Language,
        response: String,
        error: Option<String>,
    ) -> QueryOutcome {
        QueryOutcome {
            response,
            language,
            session_id: request.session_id.clone(),
            input_type: request.input_type.clone(),
            timestamp: Utc::now(),
            error,
        }
    }
}
