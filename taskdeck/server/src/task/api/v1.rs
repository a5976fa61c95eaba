use crate::auth::CurrentOwner;
use crate::task::{TaskService, TaskState};
use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use taskdeck_core::board::{NewSubtask, NewTask};
use taskdeck_core::model::{Priority, Subtask, Task};
use taskdeck_core::rules::{
    CreateError, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    /// Unique identifier for the task
    id: Uuid,
    /// Task title, stored trimmed
    title: String,
    /// Optional task description
    description: Option<String>,
    /// Optional due date (calendar date)
    due_date: Option<NaiveDate>,
    /// Priority code: 0=Low, 1=Medium, 2=High
    priority: u8,
    /// Status code: 0=Pending, 1=InProgress, 2=Completed
    status: u8,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority.code(),
            status: task.status.code(),
            created_at: task.created_at,
        }
    }
}

/// JSON representation of a Subtask for API responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskJson {
    /// Unique identifier for the subtask
    id: Uuid,
    /// Identifier of the parent task
    parent_task_id: Uuid,
    /// Subtask title, stored trimmed
    title: String,
    /// Status code: 0=Pending, 1=InProgress, 2=Completed
    status: u8,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl From<Subtask> for SubtaskJson {
    fn from(subtask: Subtask) -> Self {
        Self {
            id: subtask.id,
            parent_task_id: subtask.parent_task_id,
            title: subtask.title,
            status: subtask.status.code(),
            created_at: subtask.created_at,
        }
    }
}

/// Request payload for creating a task.
///
/// The schema bounds below are the same named constants the business layer
/// checks against; violations here are reported as a batch of field errors
/// before the service is invoked.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title (3-100 characters)
    #[validate(length(
        min = TITLE_MIN_CHARS,
        max = TITLE_MAX_CHARS,
        message = "title must be between 3 and 100 characters"
    ))]
    pub title: String,
    /// Optional description (max 1000 characters)
    #[validate(length(
        max = DESCRIPTION_MAX_CHARS,
        message = "description cannot exceed 1000 characters"
    ))]
    pub description: Option<String>,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Optional priority code: 0=Low, 1=Medium, 2=High
    #[validate(range(min = 0, max = 2, message = "priority must be 0, 1 or 2"))]
    pub priority: Option<u8>,
}

impl CreateTaskRequest {
    fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority.and_then(Priority::from_code),
        }
    }
}

/// Request payload for creating a subtask.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubtaskRequest {
    /// Identifier of the parent task
    pub parent_task_id: Uuid,
    /// Subtask title (3-100 characters)
    #[validate(length(
        min = TITLE_MIN_CHARS,
        max = TITLE_MAX_CHARS,
        message = "title must be between 3 and 100 characters"
    ))]
    pub title: String,
}

impl CreateSubtaskRequest {
    fn into_new_subtask(self) -> NewSubtask {
        NewSubtask {
            parent_task_id: self.parent_task_id,
            title: self.title,
        }
    }
}

/// Success envelope for a created task.
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskCreatedResponse {
    success: bool,
    data: TaskJson,
}

/// Success envelope for a created subtask.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubtaskCreatedResponse {
    success: bool,
    data: SubtaskJson,
}

/// Success envelope for a task listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct TasksResponse {
    success: bool,
    data: Vec<TaskJson>,
}

/// Success envelope for a single task read.
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    success: bool,
    data: TaskJson,
}

/// Success envelope for a subtask listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubtasksResponse {
    success: bool,
    data: Vec<SubtaskJson>,
}

/// A single field-level schema violation.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending field
    field: String,
    /// Human-readable description of the violation
    message: String,
}

/// Error payload nested in the error envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable error code
    code: String,
    /// Human-readable error message
    message: String,
    /// Field-level violations, present for schema errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldViolation>>,
}

/// Error envelope returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

impl ErrorResponse {
    fn new(code: &str, message: &str) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            },
        }
    }

    /// Flattens validator output into a deterministic list of field
    /// violations, all of them reported at once.
    fn validation(errors: &validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, violations)| {
                let field = field.to_string();
                violations
                    .iter()
                    .map(|violation| FieldViolation {
                        field: field.clone(),
                        message: violation
                            .message
                            .as_ref()
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| violation.code.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        Self {
            success: false,
            error: ErrorBody {
                code: "VALIDATION_ERROR".to_string(),
                message: "Validation failed".to_string(),
                details: Some(details),
            },
        }
    }
}

/// Failures a task API handler can produce.
///
/// Business and schema rejections are mapped to client errors here; they
/// never reach generic error handling.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request payload violated the declared schema.
    #[error("Validation failed")]
    Schema(#[from] validator::ValidationErrors),
    /// A business rule rejected the creation.
    #[error(transparent)]
    Create(#[from] CreateError),
    /// The requested task does not exist for this owner.
    #[error("Task not found")]
    TaskMissing,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Schema(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::validation(&errors)),
            )
                .into_response(),
            ApiError::Create(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.code(), &err.to_string())),
            )
                .into_response(),
            ApiError::TaskMissing => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    CreateError::TaskNotFound.code(),
                    "Task not found",
                )),
            )
                .into_response(),
        }
    }
}

/// Handler for POST /api/v1/tasks - Creates a task for the current owner.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskCreatedResponse),
        (status = 400, description = "Schema or business validation failed", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Extension(owner): Extension<CurrentOwner>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskCreatedResponse>), ApiError> {
    payload.validate()?;

    let service = TaskService::new(&state.board);
    let task = service.create_task(&owner.id, payload.into_new_task()).await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskCreatedResponse {
            success: true,
            data: task.into(),
        }),
    ))
}

/// Handler for POST /api/v1/subtasks - Creates a subtask under an existing
/// task of the current owner.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/v1/subtasks",
    request_body = CreateSubtaskRequest,
    responses(
        (status = 201, description = "Subtask created", body = SubtaskCreatedResponse),
        (status = 400, description = "Schema or business validation failed", body = ErrorResponse)
    ),
    tag = "Subtasks"
)]
pub async fn create_subtask_handler(
    State(state): State<Arc<TaskState>>,
    Extension(owner): Extension<CurrentOwner>,
    Json(payload): Json<CreateSubtaskRequest>,
) -> Result<(StatusCode, Json<SubtaskCreatedResponse>), ApiError> {
    payload.validate()?;

    let service = TaskService::new(&state.board);
    let subtask = service
        .create_subtask(&owner.id, payload.into_new_subtask())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubtaskCreatedResponse {
            success: true,
            data: subtask.into(),
        }),
    ))
}

/// Handler for GET /api/v1/tasks - Lists the current owner's tasks in
/// insertion order.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Tasks for the current owner", body = TasksResponse)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<Arc<TaskState>>,
    Extension(owner): Extension<CurrentOwner>,
) -> Json<TasksResponse> {
    let service = TaskService::new(&state.board);
    let tasks = service.tasks_for_owner(&owner.id).await;

    Json(TasksResponse {
        success: true,
        data: tasks.into_iter().map(TaskJson::from).collect(),
    })
}

/// Handler for GET /api/v1/tasks/{id} - Retrieves one task of the current
/// owner. Absence is a 404, never an internal error.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "The requested task", body = TaskResponse),
        (status = 404, description = "No such task for this owner", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    Extension(owner): Extension<CurrentOwner>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskResponse>, ApiError> {
    let service = TaskService::new(&state.board);
    let task = service
        .task_by_id(&owner.id, task_id)
        .await
        .ok_or(ApiError::TaskMissing)?;

    Ok(Json(TaskResponse {
        success: true,
        data: task.into(),
    }))
}

/// Handler for GET /api/v1/tasks/{id}/subtasks - Lists the subtasks of a
/// task. An unknown task id yields an empty list.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}/subtasks",
    params(("id" = Uuid, Path, description = "Parent task identifier")),
    responses(
        (status = 200, description = "Subtasks of the task", body = SubtasksResponse)
    ),
    tag = "Subtasks"
)]
pub async fn list_subtasks_handler(
    State(state): State<Arc<TaskState>>,
    Extension(owner): Extension<CurrentOwner>,
    Path(task_id): Path<Uuid>,
) -> Json<SubtasksResponse> {
    let service = TaskService::new(&state.board);
    let subtasks = service.subtasks_for_task(&owner.id, task_id).await;

    Json(SubtasksResponse {
        success: true,
        data: subtasks.into_iter().map(SubtaskJson::from).collect(),
    })
}

/// Creates and returns the task API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/tasks/{id}", get(get_task_handler))
        .route("/tasks/{id}/subtasks", get(list_subtasks_handler))
        .route("/subtasks", post(create_subtask_handler))
        .with_state(state)
}
