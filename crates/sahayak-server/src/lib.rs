//! HTTP surface for the assistant.
//!
//! Exposes the axum router and the application context so integration
//! tests can drive the API without binding a socket.

mod context;
mod routes;

pub use context::AppContext;
pub use routes::router;
