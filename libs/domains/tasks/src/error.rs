use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Also returned for tasks owned by someone else
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("Task with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// The task store could not be reached or rejected the operation
    #[error("Task store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::DuplicateName(_) => AppError::Conflict(err.to_string()),
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            // Rendered as a generic 500; the detail only reaches the logs
            TaskError::Unavailable(msg) => {
                AppError::InternalServerError(format!("Task store unavailable: {}", msg))
            }
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for TaskError {
    fn from(err: mongodb::error::Error) -> Self {
        TaskError::Unavailable(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TaskError {
    fn from(err: validator::ValidationErrors) -> Self {
        TaskError::Validation(err.to_string())
    }
}
