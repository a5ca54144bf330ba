//! Sign-in and sign-out endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::AuthStore;
use crate::http::error::ApiError;
use crate::http::extractors::SessionToken;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SigninResponse {
    pub token: Uuid,
    pub username: String,
    pub expires_at: String,
}

/// POST /auth/signin - verify credentials, issue a session token.
async fn signin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    let auth = AuthStore::new(&state.pool);
    let username = req.username.trim();

    if !auth.authenticate(username, &req.password).await? {
        return Err(ApiError::Unauthorized);
    }

    let session = auth.create_session(username).await?;
    tracing::info!(username, "signed in");

    Ok(Json(SigninResponse {
        token: session.token,
        username: session.username,
        expires_at: session.expires_at.to_rfc3339(),
    }))
}

/// POST /auth/signout - revoke the presented session token.
async fn signout(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
) -> Result<StatusCode, ApiError> {
    if AuthStore::new(&state.pool)
        .delete_session(token)
        .await?
        .applied()
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "session" })
    }
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signin", post(signin))
        .route("/auth/signout", post(signout))
}
