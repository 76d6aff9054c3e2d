//! Context retrieval seam for grounding generation prompts.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

/// A retrieved snippet used to ground the generation prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextDocument {
    /// Snippet text embedded into the prompt.
    pub content: String,
}

impl ContextDocument {
    /// Build a document from snippet text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Retrieval capability consumed by the dispatcher.
///
/// Infallible by contract: backends swallow their own errors and
/// return an empty list, so a broken retrieval store never fails a
/// chat exchange.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Return up to `k` documents relevant to the query.
    async fn similar_documents(&self, query: &str, k: usize) -> Vec<ContextDocument>;
}

/// Retriever used when no backing store is configured.
#[derive(Debug, Default, Clone)]
pub struct NoopRetriever;

#[async_trait]
impl ContextRetriever for NoopRetriever {
    async fn similar_documents(&self, query: &str, _k: usize) -> Vec<ContextDocument> {
        debug!("no retrieval backend configured (query_len={})", query.len());
        Vec::new()
    }
}
