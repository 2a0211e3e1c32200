//! Error Types
//!
//! A single error enum shared by the task store, the request handlers and the
//! discovery client. Handlers turn it straight into a plain-text HTTP reply.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::tasks::types::TaskState;

#[derive(Error, Debug, PartialEq)]
pub enum DatabaseError {
    #[error("Wrong input: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    NotFound(usize),

    #[error("Task {id} is not in progress (state: {state})")]
    Conflict { id: usize, state: TaskState },

    #[error("No non-started task")]
    NoAvailableTask,

    #[error("Discovery store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

impl DatabaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DatabaseError::InvalidArgument(_)
            | DatabaseError::NotFound(_)
            | DatabaseError::NoAvailableTask => StatusCode::BAD_REQUEST,
            DatabaseError::Conflict { .. } => StatusCode::CONFLICT,
            DatabaseError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Text sent to the client. Unknown ids are reported as bad input so the
    /// caller cannot tell them apart from malformed ids.
    pub fn client_message(&self) -> String {
        match self {
            DatabaseError::InvalidArgument(_) | DatabaseError::NotFound(_) => {
                "Error: Wrong input".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}

impl IntoResponse for DatabaseError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejecting request: {}", self);
        (self.status_code(), self.client_message()).into_response()
    }
}
