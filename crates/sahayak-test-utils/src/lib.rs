//! Mock providers shared by core and server tests.

mod generation;
mod retrieval;

pub use generation::{FailingGeneration, FixedGeneration, RecordingGeneration};
pub use retrieval::StaticRetriever;
