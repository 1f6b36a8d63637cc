//! Task API endpoints
//!
//! RESTful API for task CRUD operations.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use uuid::Uuid;

use tr_core::task::{validate, Task, TaskPatch, TaskPriority, TaskRepository};

use crate::envelope::{ApiError, Envelope};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Partial update payload.
///
/// The nullable fields deserialize through `double_option` so that an
/// explicit `null` (clear the field) is distinguishable from an absent key
/// (keep the stored value).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: TaskPriority,
    pub category: Option<String>,
    pub deadline: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            completed: task.completed,
            priority: task.priority,
            category: task.category,
            deadline: task.deadline.map(|t| t.to_rfc3339()),
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Parse a path id; a malformed id reads as a missing record, not a client
/// syntax error.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Task not found"))
}

fn reject_body(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

/// GET /api/tasks - List all tasks
async fn list_tasks(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Envelope<Vec<TaskResponse>>>), ApiError> {
    let tasks = state.task_store().list().await?;
    info!("Retrieved all tasks");

    Ok(Envelope::ok(
        StatusCode::OK,
        "Tasks retrieved successfully",
        tasks.into_iter().map(TaskResponse::from).collect(),
    ))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<TaskResponse>>), ApiError> {
    let Json(req) = payload.map_err(reject_body)?;

    validate::validate_name(&req.name)?;
    if let Some(description) = &req.description {
        validate::validate_description(description)?;
    }
    if let Some(category) = &req.category {
        validate::validate_category(category)?;
    }
    let deadline = req
        .deadline
        .as_deref()
        .map(validate::parse_deadline)
        .transpose()?;

    let mut task = Task::new(req.name);

    if let Some(description) = req.description {
        task = task.with_description(description);
    }
    if let Some(completed) = req.completed {
        task = task.with_completed(completed);
    }
    if let Some(priority) = req.priority {
        task = task.with_priority(priority);
    }
    if let Some(category) = req.category {
        task = task.with_category(category);
    }
    if let Some(deadline) = deadline {
        task = task.with_deadline(deadline);
    }

    let created = state.task_store().create(task).await?;
    info!("Created new task: {}", created.name);

    Ok(Envelope::ok(
        StatusCode::CREATED,
        "Task created successfully",
        TaskResponse::from(created),
    ))
}

/// GET /api/tasks/:id - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Envelope<TaskResponse>>), ApiError> {
    let id = parse_id(&id)?;

    let task = state
        .task_store()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;
    info!("Retrieved task: {}", task.name);

    Ok(Envelope::ok(
        StatusCode::OK,
        "Task retrieved successfully",
        TaskResponse::from(task),
    ))
}

/// PUT /api/tasks/:id - Apply a partial update to a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<TaskResponse>>), ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = payload.map_err(reject_body)?;

    if let Some(name) = &req.name {
        validate::validate_rename(name)?;
    }
    if let Some(Some(description)) = &req.description {
        validate::validate_description(description)?;
    }
    if let Some(Some(category)) = &req.category {
        validate::validate_category(category)?;
    }
    let deadline = match &req.deadline {
        Some(Some(raw)) => Some(Some(validate::parse_deadline(raw)?)),
        Some(None) => Some(None),
        None => None,
    };

    let patch = TaskPatch {
        name: req.name,
        description: req.description,
        completed: req.completed,
        priority: req.priority,
        category: req.category,
        deadline,
    };

    let updated = state.task_store().update(id, patch).await?;
    info!("Updated task: {}", updated.name);

    Ok(Envelope::ok(
        StatusCode::OK,
        "Task updated successfully",
        TaskResponse::from(updated),
    ))
}

/// DELETE /api/tasks/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    let deleted = state.task_store().delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Task not found"));
    }
    info!("Deleted task: {}", id);

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
