//! Session persistence and query dispatch for the assistant.
//!
//! This crate owns the SQLite-backed session store, the query
//! dispatcher, the provider seams for generation and context
//! retrieval, and the static job catalog used by the server.

pub mod dispatcher;
pub mod error;
pub mod jobs;
pub mod prompt;
pub mod provider;
pub mod retrieval;
pub mod store;
pub mod types;

pub use dispatcher::{APOLOGY_REPLY, Dispatcher, EMPTY_QUERY_REPLY};
pub use error::{GenerationError, StoreError};
pub use provider::{GeminiProvider, GenerationParams, GenerationProvider};
pub use retrieval::{ContextDocument, ContextRetriever, NoopRetriever};
pub use store::SessionStore;
pub use types::{PreferenceMap, QueryOutcome, QueryRequest, TurnRecord};
