//! HTTP layer - axum server, routes, error mapping
//!
//! JSON API over the per-user stores:
//! - bearer-token sessions, validated by the `CurrentUser` extractor
//! - request tracing
//! - graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, AppState, ServerConfig};
