use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api_error::ApiErrorBody;

/// Failure of a service call, mapped onto an HTTP status by the handlers
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request was understood but rejected; the message is shown to the user
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client. Internal details stay in the log.
    pub fn body(&self) -> ApiErrorBody {
        match self {
            ServiceError::Internal(_) => ApiErrorBody::new("Internal server error"),
            other => ApiErrorBody::new(other.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Internal(e) => tracing::error!("internal error: {:#}", e),
            other => tracing::warn!("request rejected: {}", other),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
