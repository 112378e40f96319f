use axum::{extract::State, Json};

use crate::{models::StoreStats, AppState};

/// GET /api/stats — aggregates recomputed on every call.
pub async fn get_stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.store.stats().await)
}
