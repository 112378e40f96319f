use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::{error::AppError, AppState};

/// Header carrying the shared API secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// One log line per request — the fmt subscriber prefixes the timestamp.
/// Runs for every route, before routing decides anything.
pub async fn request_log(req: Request, next: Next) -> Response {
    info!(method = %req.method(), path = %req.uri().path(), "request");
    next.run(req).await
}

/// Gate for everything under `/api`: the request proceeds only when the
/// header value verifies against the configured key store.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if state.api_keys.verify(key) => Ok(next.run(req).await),
        _ => Err(AppError::Unauthorized),
    }
}
