//! Route modules, one per resource.

pub mod auth;
pub mod health;
pub mod lists;
pub mod todos;

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

/// All API routes, merged.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(lists::router())
        .merge(todos::router())
}
