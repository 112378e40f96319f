use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::AppResult,
    models::{ListQuery, Product, ProductPage},
    validate::ValidProduct,
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ProductPage> {
    let page = state.store.list(&query).await;

    info!(
        returned = page.products.len(),
        total = page.total_products,
        "Listed products"
    );

    Json(page)
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.store.get(&id).await?;
    Ok(Json(product))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    ValidProduct(draft): ValidProduct,
) -> (StatusCode, Json<Product>) {
    let product = state.store.create(draft).await;
    (StatusCode::CREATED, Json(product))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidProduct(draft): ValidProduct,
) -> AppResult<Json<Product>> {
    let product = state.store.update(&id, draft).await?;
    Ok(Json(product))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let product = state.store.delete(&id).await?;

    Ok(Json(serde_json::json!({
        "message": "Product deleted successfully",
        "product": product,
    })))
}
