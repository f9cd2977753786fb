/// Task endpoints
///
/// All routes here sit behind the session middleware, and every store call
/// takes the resolved account id explicitly. The ownership scope is part
/// of each SQL statement, so a request can only ever see or touch the
/// caller's own rows.
///
/// A task id that does not exist and a task id owned by someone else get
/// the identical 404 response. Keeping the two indistinguishable means a
/// caller cannot probe which ids exist under other accounts.
///
/// # Endpoints
///
/// - `GET    /v1/tasks` - List the caller's tasks
/// - `POST   /v1/tasks` - Create a task
/// - `PUT    /v1/tasks/:id` - Update title/description of an owned task
/// - `DELETE /v1/tasks/:id` - Delete an owned task
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use checkpad_shared::{
    auth::middleware::AuthContext,
    models::task::{NewTask, Task},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Generic denial for a task id the caller may not act on, whether the id
/// is missing or owned by another account.
const TASK_NOT_FOUND: &str = "Task not found";

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    /// Task description
    #[validate(length(min = 1, max = 500, message = "Description must be 1 to 500 characters"))]
    pub description: String,
}

/// Update task request
///
/// Both fields are required; an update replaces title and description
/// wholesale, leaving owner and creation time untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    /// New description
    #[validate(length(min = 1, max = 500, message = "Description must be 1 to 500 characters"))]
    pub description: String,
}

/// Task as rendered to clients
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task id
    pub id: i64,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            created_at: task.created_at,
        }
    }
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// The caller's tasks, in stable insertion order
    pub tasks: Vec<TaskResponse>,
}

/// List the caller's tasks
///
/// Returns every task owned by the authenticated account and nothing
/// else, ordered by id.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_by_owner(&state.db, auth.account_id).await?;

    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

/// Create a task owned by the caller
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty or over-long title/description
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        NewTask {
            owner_id: auth.account_id,
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    tracing::info!(account_id = auth.account_id, task_id = task.id, "Task created");

    Ok(Json(TaskResponse::from(task)))
}

/// Update the title and description of an owned task
///
/// # Errors
///
/// - `404 Not Found`: the id does not exist or belongs to another account
/// - `422 Unprocessable Entity`: empty or over-long title/description
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = Task::update_owned(&state.db, id, auth.account_id, &req.title, &req.description)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    tracing::info!(account_id = auth.account_id, task_id = task.id, "Task updated");

    Ok(Json(TaskResponse::from(task)))
}

/// Permanently delete an owned task
///
/// # Errors
///
/// - `404 Not Found`: the id does not exist or belongs to another account.
///   A repeat delete of the same id lands here too, since the row is gone.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete_owned(&state.db, id, auth.account_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    tracing::info!(account_id = auth.account_id, task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_validation() {
        let valid = CreateTaskRequest {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: "".to_string(),
            description: "2%".to_string(),
        };
        assert!(empty_title.validate().is_err());

        let empty_description = CreateTaskRequest {
            title: "Buy milk".to_string(),
            description: "".to_string(),
        };
        assert!(empty_description.validate().is_err());

        let long_title = CreateTaskRequest {
            title: "a".repeat(201),
            description: "ok".to_string(),
        };
        assert!(long_title.validate().is_err());

        let long_description = CreateTaskRequest {
            title: "ok".to_string(),
            description: "a".repeat(501),
        };
        assert!(long_description.validate().is_err());

        // Boundary lengths are accepted
        let at_limits = CreateTaskRequest {
            title: "a".repeat(200),
            description: "a".repeat(500),
        };
        assert!(at_limits.validate().is_ok());
    }

    #[test]
    fn test_update_task_request_validation() {
        let valid = UpdateTaskRequest {
            title: "Buy oat milk".to_string(),
            description: "2%".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = UpdateTaskRequest {
            title: "".to_string(),
            description: "".to_string(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_task_response_from_task() {
        let task = Task {
            id: 1,
            owner_id: 42,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            created_at: Utc::now(),
        };

        let response = TaskResponse::from(task);
        assert_eq!(response.id, 1);
        assert_eq!(response.title, "Buy milk");

        // The owner is implicit in whose list the task appears; it is not
        // rendered in the response body.
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("owner_id"));
    }
}
