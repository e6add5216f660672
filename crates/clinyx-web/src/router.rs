//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    system::health,
    catalog::{api_stats, api_symptoms, api_signs, api_diseases, api_disease_detail, api_reload},
    inference::{api_infer, api_infer_by_name},
    page::{inference_page, inference_submit},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/inference", get(inference_page).post(inference_submit))

        // API endpoints
        .route("/health",                get(health))
        .route("/api/catalog/stats",     get(api_stats))
        .route("/api/catalog/symptoms",  get(api_symptoms))
        .route("/api/catalog/signs",     get(api_signs))
        .route("/api/catalog/reload",    post(api_reload))
        .route("/api/diseases",          get(api_diseases))
        .route("/api/diseases/{id}",     get(api_disease_detail))
        .route("/api/inference",         post(api_infer))
        .route("/api/inference/by-name", post(api_infer_by_name))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
