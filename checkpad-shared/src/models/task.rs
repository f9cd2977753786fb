/// Task model and database operations
///
/// A task is a to-do item owned by exactly one account. Every read and
/// every mutation is scoped by owner in the SQL itself: a task that exists
/// but belongs to someone else behaves exactly like a task that does not
/// exist. Callers therefore see a single "no such task" outcome for both
/// cases and cannot probe other accounts' task ids.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     owner_id BIGINT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description VARCHAR(500) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use checkpad_shared::models::task::{NewTask, Task};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, account_id: i64) -> Result<(), sqlx::Error> {
/// let task = Task::create(
///     &pool,
///     NewTask {
///         owner_id: account_id,
///         title: "Buy milk".to_string(),
///         description: "2%".to_string(),
///     },
/// )
/// .await?;
///
/// let mine = Task::list_by_owner(&pool, account_id).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task model representing one to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id, assigned by the database
    pub id: i64,

    /// Owning account (immutable after creation)
    pub owner_id: i64,

    /// Short title, at most 200 characters
    pub title: String,

    /// Longer free-text description, at most 500 characters
    pub description: String,

    /// When the task was created (immutable)
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Owning account
    pub owner_id: i64,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,
}

impl Task {
    /// Creates a new task for an account
    ///
    /// The owner comes from the resolved session, never from client input,
    /// so a created task always belongs to the caller.
    pub async fn create(pool: &PgPool, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by an account
    ///
    /// Ordered by id, which is insertion order and stable across repeated
    /// reads with no intervening writes.
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, created_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates the title and description of a task the account owns
    ///
    /// The owner scope lives in the WHERE clause, so one statement covers
    /// lookup, ownership check, and write; there is no window between them.
    /// `created_at` and `owner_id` are never touched. Under concurrent
    /// updates the last write wins.
    ///
    /// Returns `None` when the id does not exist or belongs to another
    /// account. The two cases are indistinguishable on purpose.
    pub async fn update_owned(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        title: &str,
        description: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, description = $4
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Permanently deletes a task the account owns
    ///
    /// Returns false when the id does not exist or belongs to another
    /// account, under the same single-outcome rule as [`Task::update_owned`].
    /// Deleting an already-deleted id is not an error at this layer.
    pub async fn delete_owned(pool: &PgPool, id: i64, owner_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_struct() {
        let new_task = NewTask {
            owner_id: 1,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
        };

        assert_eq!(new_task.owner_id, 1);
        assert_eq!(new_task.title, "Buy milk");
    }

    // Store operations need a live database and are exercised through the
    // API integration tests.
}
