//! Language-specific instruction templates for generation calls.

use crate::retrieval::ContextDocument;
use sahayak_config::Language;

/// Compose the instruction prompt for a query in the given language,
/// embedding retrieved context or an explicit no-context marker.
pub fn build_prompt(language: Language, documents: &[ContextDocument], query: &str) -> String {
    let context = documents
        .iter()
        .map(|document| document.content.as_str())
        .filter(|content| !content.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let context_block = if context.is_empty() {
        "Context: No relevant documents found.".to_string()
    } else {
        format!("Context:\n{context}")
    };

    match language {
        Language::En => format!(
            "You are a helpful assistant for a government employment services platform. \
             Answer the user's question based ONLY on the provided context if available. \
             If not, provide general guidance about job search, skill development, and \
             foreign counseling services in Punjab.\n\n{context_block}\n\nQuestion: {query}\n\nAnswer in English:"
        ),
        Language::Hi => format!(
            "आप एक सरकारी रोजगार सेवा मंच के सहायक हैं। केवल दिए गए संदर्भ के आधार पर उत्तर दें यदि \
             उपलब्ध हो। यदि नहीं, तो पंजाब में नौकरी खोज, कौशल विकास और विदेशी परामर्श सेवाओं से \
             संबंधित सामान्य मार्गदर्शन प्रदान करें।\n\n{context_block}\n\nप्रश्न: {query}\n\nउत्तर हिंदी में दें:"
        ),
        Language::Pa => format!(
            "ਤੁਸੀਂ ਇੱਕ ਸਰਕਾਰੀ ਰੁਜ਼ਗਾਰ ਸੇਵਾ ਪਲੇਟਫਾਰਮ ਲਈ ਸਹਾਇਕ ਹੋ। ਸਿਰਫ਼ ਦਿੱਤੇ ਸੰਦਰਭ ਦੇ ਆਧਾਰ 'ਤੇ ਜਵਾਬ \
             ਦਿਓ ਜੇਕਰ ਉਪਲਬਧ ਹੋਵੇ। ਜੇਕਰ ਨਹੀਂ, ਤਾਂ ਪੰਜਾਬ ਵਿੱਚ ਨੌਕਰੀ ਦੀ ਖੋਜ, ਹੁਨਰ ਵਿਕਾਸ ਅਤੇ ਵਿਦੇਸ਼ੀ \
             ਸਲਾਹ ਸੇਵਾਵਾਂ ਬਾਰੇ ਆਮ ਮਾਰਗਦਰਸ਼ਨ ਪ੍ਰਦਾਨ ਕਰੋ।\n\n{context_block}\n\nਸਵਾਲ: {query}\n\nਜਵਾਬ ਪੰਜਾਬੀ ਵਿੱਚ ਦਿਓ:"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::build_prompt;
    use crate::retrieval::ContextDocument;
    use sahayak_config::Language;

    #[test]
    fn prompt_marks_missing_context() {
        let prompt = build_prompt(Language::En, &[], "How do I register?");
        assert!(prompt.contains("No relevant documents found."));
        assert!(prompt.contains("Question: How do I register?"));
        assert!(prompt.ends_with("Answer in English:"));
    }

    #[test]
    fn prompt_embeds_context_documents() {
        let documents = vec![
            ContextDocument::new("Registration opens in June."),
            ContextDocument::new("Bring identity proof."),
        ];
        let prompt = build_prompt(Language::En, &documents, "When can I register?");
        assert!(prompt.contains("Registration opens in June.\nBring identity proof."));
        assert!(!prompt.contains("No relevant documents found."));
    }

    #[test]
    fn prompt_follows_resolved_language() {
        let prompt = build_prompt(Language::Hi, &[], "नौकरी कैसे खोजें?");
        assert!(prompt.contains("प्रश्न: नौकरी कैसे खोजें?"));
        let prompt = build_prompt(Language::Pa, &[], "ਨੌਕਰੀ");
        assert!(prompt.contains("ਸਵਾਲ: ਨੌਕਰੀ"));
    }
}
