/// Account model and database operations
///
/// An account is an authenticated identity: a unique username plus an
/// Argon2id credential hash. Accounts are created by registration and are
/// immutable afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(150) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The unique constraint on `username` is the enforcement point for
/// username uniqueness. Callers insert and map the constraint violation;
/// they never check-then-act, which would race under concurrent
/// registration.
///
/// # Example
///
/// ```no_run
/// use checkpad_shared::models::account::{Account, NewAccount};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let account = Account::create(
///     &pool,
///     NewAccount {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// let found = Account::find_by_username(&pool, "alice").await?;
/// assert_eq!(found.unwrap().id, account.id);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Account model representing one registered user
///
/// `password_hash` holds the Argon2id PHC string, never a plaintext
/// password. Usernames match case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account id, assigned by the database
    pub id: i64,

    /// Unique username (case-sensitive, immutable)
    pub username: String,

    /// Argon2id credential hash
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Username (must not collide with an existing account)
    pub username: String,

    /// Argon2id credential hash (hash before calling, never plaintext)
    pub password_hash: String,
}

impl Account {
    /// Creates a new account
    ///
    /// # Errors
    ///
    /// Returns a database error carrying the unique-constraint violation if
    /// the username is already taken; callers map that to their duplicate
    /// error. Any other failure is a plain storage error.
    pub async fn create(pool: &PgPool, data: NewAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by exact username
    ///
    /// The lookup is case-sensitive: "Alice" and "alice" are different
    /// accounts.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_struct() {
        let new_account = NewAccount {
            username: "alice".to_string(),
            password_hash: "$argon2id$hash".to_string(),
        };

        assert_eq!(new_account.username, "alice");
        assert!(new_account.password_hash.starts_with("$argon2id$"));
    }

    // Store operations need a live database and are exercised through the
    // API integration tests.
}
