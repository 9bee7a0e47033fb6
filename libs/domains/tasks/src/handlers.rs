use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuthUser, SharedVerifier, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::events::TaskEvent;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub const TAG: &str = "tasks";

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, patch_task, delete_task),
    components(
        schemas(Task, CreateTask, UpdateTask, TaskEvent),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Task management for the authenticated user")
    )
)]
pub struct ApiDoc;

/// Task routes, all behind [`jwt_auth_middleware`].
pub fn router<R: TaskRepository + 'static>(
    service: Arc<TaskService<R>>,
    verifier: SharedVerifier,
) -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/{id}",
            get(get_task)
                .put(update_task)
                .patch(patch_task)
                .delete(delete_task),
        )
        .layer(middleware::from_fn_with_state(verifier, jwt_auth_middleware))
        .with_state(service)
}

/// List the caller's tasks, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    AuthUser(user): AuthUser,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks(&user).await?;
    Ok(Json(tasks))
}

/// Create a task
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    AuthUser(user): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(&user, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get one of the caller's tasks
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = uuid::Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(&user, id).await?;
    Ok(Json(task))
}

/// Update one of the caller's tasks
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = uuid::Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    let task = service.update_task(&user, id, input).await?;
    Ok(Json(task))
}

/// Partially update one of the caller's tasks (same semantics as PUT)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = uuid::Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_task<R: TaskRepository>(
    state: State<Arc<TaskService<R>>>,
    user: AuthUser,
    id: UuidPath,
    input: ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    update_task(state, user, id, input).await
}

/// Delete one of the caller's tasks
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = uuid::Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
) -> TaskResult<StatusCode> {
    service.delete_task(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
