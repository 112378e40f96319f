pub mod products;
pub mod stats;

use axum::{http::StatusCode, Json};
use serde_json::json;

/// GET / — the one route reachable without an API key.
pub async fn root() -> &'static str {
    "Welcome to the Product API! Go to /api/products to see all products."
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "product-service" })),
    )
}
