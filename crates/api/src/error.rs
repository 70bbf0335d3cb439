use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use civiclink_core::access::DENIED;
use civiclink_core::error::CoreError;
use serde_json::json;

/// Error type returned by HTTP handlers and extractors.
///
/// Renders as `{ "error": message, "code": CODE }`. Forbidden, transient and
/// internal errors are sanitised; their detail only reaches the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Core(core) = &self;
        let (status, code, message) = match core {
            CoreError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            CoreError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            CoreError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            // The detail names ids and roles; it stays in the logs.
            CoreError::Forbidden(detail) => {
                tracing::warn!(detail = %detail, "Request denied");
                (StatusCode::FORBIDDEN, "FORBIDDEN", DENIED.to_string())
            }
            CoreError::TransientStore(msg) => {
                tracing::warn!(error = %msg, "Store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The service is temporarily unavailable, please retry".to_string(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
