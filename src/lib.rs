use std::sync::Arc;

use axum::{
    middleware as layers,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod store;
pub mod validate;

use crate::auth::{StaticApiKey, VerifyApiKey};
use crate::config::Config;
use crate::store::ProductStore;

/// Shared application state — cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
    pub api_keys: Arc<dyn VerifyApiKey>,
}

impl AppState {
    /// Fresh state with the seeded sample collection and the configured
    /// static credential.
    pub fn new(config: &Config) -> Self {
        Self {
            store: ProductStore::with_products(seed::sample_products()),
            api_keys: Arc::new(StaticApiKey::new(config.api_key.clone())),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Everything under /api sits behind the key check, unmatched paths
    // included; validation and handlers only run for keyed requests.
    let api = Router::new()
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/stats", get(handlers::stats::get_stats))
        .layer(layers::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(layers::from_fn(middleware::request_log))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
