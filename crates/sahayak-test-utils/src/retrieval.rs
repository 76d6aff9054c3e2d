use async_trait::async_trait;
use sahayak_core::retrieval::{ContextDocument, ContextRetriever};

/// Retriever mock returning a fixed document list.
#[derive(Debug, Clone, Default)]
pub struct StaticRetriever {
    documents: Vec<ContextDocument>,
}

impl StaticRetriever {
    pub fn new(snippets: &[&str]) -> Self {
        Self {
            documents: snippets
                .iter()
                .map(|snippet| ContextDocument::new(*snippet))
                .collect(),
        }
    }
}

#[async_trait]
impl ContextRetriever for StaticRetriever {
    async fn similar_documents(&self, _query: &str, k: usize) -> Vec<ContextDocument> {
        self.documents.iter().take(k).cloned().collect()
    }
}
