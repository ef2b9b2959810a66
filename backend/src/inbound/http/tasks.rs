//! Task API handlers.
//!
//! ```text
//! GET /api/todos
//! POST /api/todos {"text":"Buy milk"}
//! PUT /api/todos/{id}
//! DELETE /api/todos/{id}
//! ```
//!
//! Every handler takes an [`AuthenticatedCaller`], so requests without a
//! valid bearer token are rejected before any task is read.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Task, TaskId, TaskText, TaskValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::schemas::{ErrorSchema, TaskSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, empty_field_error, require_field};

const TEXT: FieldName = FieldName::new("text");

/// Request body for `POST /api/todos`.
///
/// Example JSON:
/// `{"text":"Buy milk"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateTaskRequest {
    pub text: Option<String>,
}

impl TryFrom<CreateTaskRequest> for TaskText {
    type Error = Error;

    fn try_from(value: CreateTaskRequest) -> Result<Self, Self::Error> {
        let raw = require_field(value.text, TEXT)?;
        Self::new(raw).map_err(map_task_validation_error)
    }
}

fn map_task_validation_error(err: TaskValidationError) -> Error {
    match err {
        TaskValidationError::EmptyText => empty_field_error(TEXT),
        TaskValidationError::InvalidId { value } => not_found(&value),
    }
}

fn not_found(raw_id: &str) -> Error {
    Error::not_found(format!("task {raw_id} not found"))
}

/// Parse the `{id}` path segment.
///
/// A segment that is not an integer cannot name a task, so it reports
/// `not_found` rather than `invalid_request`.
fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    raw.parse::<TaskId>().map_err(map_task_validation_error)
}

/// List tasks visible to the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/todos",
    responses(
        (status = 200, description = "Tasks", body = [TaskSchema]),
        (status = 401, description = "Missing bearer token", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/todos")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<Task>>> {
    let tasks = state.tasks_query.list(caller.caller()).await?;
    Ok(web::Json(tasks))
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing bearer token", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/todos")]
pub async fn create_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let text = TaskText::try_from(payload.into_inner())?;
    let task = state.tasks.create(caller.caller(), text).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Mark a task as done. Repeating the call is harmless.
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task marked done", body = TaskSchema),
        (status = 401, description = "Missing bearer token", body = ErrorSchema),
        (status = 403, description = "Invalid token or not permitted", body = ErrorSchema),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "markTaskDone"
)]
#[put("/todos/{id}")]
pub async fn mark_task_done(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<Task>> {
    let id = parse_task_id(&path)?;
    let task = state.tasks.mark_done(caller.caller(), id).await?;
    Ok(web::Json(task))
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Missing bearer token", body = ErrorSchema),
        (status = 403, description = "Invalid token or not permitted", body = ErrorSchema),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/todos/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_task_id(&path)?;
    state.tasks.delete(caller.caller(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
