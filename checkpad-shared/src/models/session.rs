/// Session model and database operations
///
/// A session row is created at login and deleted at logout. The signed
/// token a client holds references the row by id; once the row is gone or
/// past `expires_at`, the token no longer resolves. Deleting rows (rather
/// than flagging them) keeps revocation a single statement.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     account_id BIGINT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Session model representing one active login
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session id, referenced by the issued token
    pub id: Uuid,

    /// Account the session was issued for
    pub account_id: i64,

    /// When the session was established
    pub created_at: DateTime<Utc>,

    /// When the session stops resolving, even if never logged out
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for an account, expiring after `ttl`
    pub async fn create(
        pool: &PgPool,
        account_id: i64,
        ttl: Duration,
    ) -> Result<Self, sqlx::Error> {
        let expires_at = Utc::now() + ttl;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (account_id, expires_at)
            VALUES ($1, $2)
            RETURNING id, account_id, created_at, expires_at
            "#,
        )
        .bind(account_id)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Finds a session that is still within its lifetime
    ///
    /// Returns `None` for a revoked (deleted) session as well as for one
    /// whose `expires_at` has passed; callers cannot tell the difference,
    /// and neither resolves.
    pub async fn find_active(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, account_id, created_at, expires_at
            FROM sessions
            WHERE id = $1 AND expires_at > NOW()
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Revokes a session
    ///
    /// Returns true if a row was deleted, false if the session was already
    /// gone. Logout treats both as success.
    pub async fn revoke(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes all sessions past their expiration
    ///
    /// Housekeeping only. `find_active` already filters on `expires_at`,
    /// so correctness never depends on this sweep running.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
