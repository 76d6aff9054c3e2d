use async_trait::async_trait;
use parking_lot::Mutex;
use sahayak_core::error::GenerationError;
use sahayak_core::provider::{GenerationParams, GenerationProvider};
use std::sync::Arc;

/// Generation mock returning a fixed response.
#[derive(Debug, Clone)]
pub struct FixedGeneration {
    response: String,
}

impl FixedGeneration {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl GenerationProvider for FixedGeneration {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        Ok(self.response.clone())
    }
}

/// Generation mock that always fails.
#[derive(Debug, Clone)]
pub struct FailingGeneration {
    message: String,
}

impl FailingGeneration {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl GenerationProvider for FailingGeneration {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Status {
            status: 500,
            message: self.message.clone(),
        })
    }
}

/// Generation mock recording the prompts it receives.
#[derive(Debug, Clone)]
pub struct RecordingGeneration {
    response: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingGeneration {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of generation calls observed.
    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl GenerationProvider for RecordingGeneration {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.response.clone())
    }
}
