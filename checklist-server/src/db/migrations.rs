//! Schema bootstrap.
//!
//! Idempotent CREATE TABLE statements run at startup. Deleting a list
//! removes its todos through the ON DELETE CASCADE, not application
//! code; per-owner title uniqueness is the UNIQUE(title, username)
//! constraint.

use sqlx::PgPool;

use super::DbError;

/// Create all tables if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("running schema migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todolists (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            username TEXT NOT NULL REFERENCES users(username) ON DELETE CASCADE,
            UNIQUE (title, username)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            done BOOLEAN NOT NULL DEFAULT FALSE,
            todolist_id INTEGER NOT NULL REFERENCES todolists(id) ON DELETE CASCADE,
            username TEXT NOT NULL REFERENCES users(username) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token UUID PRIMARY KEY,
            username TEXT NOT NULL REFERENCES users(username) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("schema migrations complete");
    Ok(())
}
