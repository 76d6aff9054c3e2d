//! Generation provider seam.
//!
//! The dispatcher talks to the hosted model through this trait so the
//! concrete backend (hosted REST API in production, fixtures in tests)
//! stays replaceable.

mod gemini;

use crate::error::GenerationError;
use async_trait::async_trait;

pub use gemini::GeminiProvider;

/// Sampling parameters passed with every generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Maximum output tokens to request.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_output_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Text generation capability consumed by the dispatcher.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Submit a composed prompt and return the generated text.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}
