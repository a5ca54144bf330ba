//! Custom axum extractors for session handling.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::db::AuthStore;

use super::error::ApiError;
use super::server::AppState;

/// Pull the bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Result<Uuid, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;

    Uuid::parse_str(token.trim()).map_err(|_| ApiError::Unauthorized)
}

/// The raw session token, parsed but not resolved. Used by signout,
/// which needs the token itself rather than the user behind it.
pub struct SessionToken(pub Uuid);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts)?))
    }
}

/// The username behind a valid, unexpired session. Rejects with 401
/// when the header is missing, malformed, or the token is unknown.
pub struct CurrentUser(pub String);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let state = Arc::<AppState>::from_ref(state);

        let username = AuthStore::new(&state.pool)
            .session_user(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/lists");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn parses_well_formed_bearer_token() {
        let token = Uuid::new_v4();
        let parts = parts_with_auth(Some(&format!("Bearer {token}")));
        assert_eq!(bearer_token(&parts).unwrap(), token);
    }

    #[test]
    fn rejects_missing_header() {
        let parts = parts_with_auth(None);
        assert!(matches!(
            bearer_token(&parts).unwrap_err(),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let parts = parts_with_auth(Some("Basic abc123"));
        assert!(matches!(
            bearer_token(&parts).unwrap_err(),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn rejects_non_uuid_token() {
        let parts = parts_with_auth(Some("Bearer not-a-uuid"));
        assert!(matches!(
            bearer_token(&parts).unwrap_err(),
            ApiError::Unauthorized
        ));
    }
}
