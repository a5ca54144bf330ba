//! Credential verification and bearer-token sessions.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{DbError, StoreOutcome};

/// Session lifetime.
const SESSION_TTL_DAYS: i64 = 31;

/// An issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Store for users and sessions. Not scoped to a user - it is what
/// establishes one.
pub struct AuthStore<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Check a username/password pair against the stored hash.
    ///
    /// An unknown user is `false`, never an error; only store failures
    /// propagate. A malformed stored hash also verifies as `false`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DbError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(self.pool)
                .await?;

        Ok(match hash {
            Some(hash) => verify_password(password, &hash),
            None => false,
        })
    }

    /// Issue a fresh session token for an already-authenticated user.
    pub async fn create_session(&self, username: &str) -> Result<Session, DbError> {
        let token = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);

        sqlx::query("INSERT INTO sessions (token, username, expires_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(username)
            .bind(expires_at)
            .execute(self.pool)
            .await?;

        Ok(Session {
            token,
            username: username.to_owned(),
            expires_at,
        })
    }

    /// Resolve a token to its username. Expired or unknown tokens are
    /// `None`; expiry is checked in the query, not in Rust.
    pub async fn session_user(&self, token: Uuid) -> Result<Option<String>, DbError> {
        let username = sqlx::query_scalar(
            "SELECT username FROM sessions WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(username)
    }

    /// Revoke a session token.
    pub async fn delete_session(&self, token: Uuid) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(StoreOutcome::Applied)
        } else {
            Ok(StoreOutcome::NotFound)
        }
    }

    /// Insert or replace a user's credentials.
    ///
    /// Operational provisioning for the `add-user` subcommand; there
    /// is no signup flow, users are created out of band.
    pub async fn upsert_user(&self, username: &str, password: &str) -> Result<(), DbError> {
        let hash = hash_password(password).map_err(DbError::Hash)?;

        sqlx::query(
            "INSERT INTO users (username, password) VALUES ($1, $2) \
             ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password",
        )
        .bind(username)
        .bind(hash)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// Constant-time password check against a stored argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(
            hash_password("same").unwrap(),
            hash_password("same").unwrap()
        );
    }
}
