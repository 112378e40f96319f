use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown id on get/update/delete.
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed required fields on a write.
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized - Invalid API key")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation Error", "message": message }),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized - Invalid API key" }),
            ),
            AppError::Internal(err) => {
                error!("unhandled error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": err.to_string(), "status": 500 }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
