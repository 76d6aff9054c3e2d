//! Application context built once at startup and shared by handlers.

use log::{info, warn};
use sahayak_config::ServerConfig;
use sahayak_core::provider::GenerationProvider;
use sahayak_core::{Dispatcher, GeminiProvider, GenerationParams, SessionStore, StoreError};
use std::sync::Arc;

/// Shared state for all request handlers: config, store, dispatcher.
///
/// Replaces the process-global singleton shape: constructed explicitly
/// in `main` (or a test) and injected via axum state.
pub struct AppContext {
    /// Loaded server configuration.
    pub config: ServerConfig,
    /// Session store backing preferences and history.
    pub store: Arc<SessionStore>,
    /// Query dispatcher.
    pub dispatcher: Dispatcher,
}

impl AppContext {
    /// Assemble a context from pre-built collaborators. Tests inject
    /// mock generation providers here.
    pub fn new(
        config: ServerConfig,
        store: Arc<SessionStore>,
        generation: Option<Arc<dyn GenerationProvider>>,
    ) -> Self {
        let dispatcher = Dispatcher::new(
            store.clone(),
            generation,
            GenerationParams {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
            },
            config.default_language,
            config.max_recommendations,
        );
        Self {
            config,
            store,
            dispatcher,
        }
    }

    /// Open the store and wire the hosted generation provider. A
    /// missing credential degrades the chat capability instead of
    /// failing startup.
    pub fn initialize(config: ServerConfig) -> Result<Arc<Self>, StoreError> {
        let store = Arc::new(SessionStore::open(
            &config.db_path,
            config.default_language,
            config.history_retain_turns,
        )?);

        let generation: Option<Arc<dyn GenerationProvider>> =
            match GeminiProvider::new(&config.model, &config.api_key) {
                Ok(provider) => {
                    info!("generation provider ready (model={})", config.model);
                    Some(Arc::new(provider))
                }
                Err(err) => {
                    warn!("starting without generation capability: {err}");
                    None
                }
            };

        Ok(Arc::new(Self::new(config, store, generation)))
    }

    /// Whether chat exchanges can reach the generation service.
    pub fn chatbot_available(&self) -> bool {
        self.dispatcher.generation_available()
    }
}
