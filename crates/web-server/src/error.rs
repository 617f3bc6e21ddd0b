use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::EntityKind;
use serde_json::json;
use services::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(EntityKind),

    /// Anything the client cannot fix. `message` is what the client sees.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: ServiceError,
    },
}

impl AppError {
    /// Not-found stays a 404; every other service failure becomes a 500
    /// carrying the operation-specific `message`.
    pub fn from_service(err: ServiceError, message: &'static str) -> Self {
        match err {
            ServiceError::NotFound(kind) => AppError::NotFound(kind),
            other => AppError::Internal { message, source: other },
        }
    }

    pub fn invalid_id(kind: EntityKind) -> Self {
        AppError::BadRequest(format!("invalid {kind} ID"))
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => {
                tracing::warn!(%message, "Rejected request.");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound(kind) => (StatusCode::NOT_FOUND, format!("{kind} not found")),
            AppError::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
