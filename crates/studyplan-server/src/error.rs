use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use studyplan_ai::error::AiError;
use studyplan_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    /// The model provider failed. Its message is passed through to the client.
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Upstream(msg) => {
                tracing::warn!("upstream model error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { .. } => ApiError::NotFound(e.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(e: AiError) -> Self {
        match e {
            AiError::InvalidRequest(inner) => ApiError::BadRequest(inner.to_string()),
            AiError::Generation(msg)
            | AiError::ScheduleGeneration(msg)
            | AiError::ConceptValidation(msg) => ApiError::Upstream(msg),
            AiError::Config(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use studyplan_core::error::CoreError;

    use super::*;

    fn status_of(e: AiError) -> StatusCode {
        ApiError::from(e).into_response().status()
    }

    #[test]
    fn ai_errors_map_to_statuses() {
        let invalid = AiError::InvalidRequest(CoreError::InvalidDate("soon".to_string()));
        assert_eq!(status_of(invalid), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AiError::ScheduleGeneration("timeout".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AiError::Config("no key".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_passes_through() {
        match ApiError::from(AiError::ConceptValidation("429: slow down".to_string())) {
            ApiError::Upstream(msg) => assert_eq!(msg, "429: slow down"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
