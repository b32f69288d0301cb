use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Connectivity
        .route("/api/connectivity", get(handlers::get_connectivity))
        .route("/api/connectivity/reprobe", post(handlers::reprobe))
        // Catalog
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/dramas", get(handlers::get_dramas))
        .route("/api/search", get(handlers::search))
        // Recommendations
        .route("/api/recommend", post(handlers::recommend))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
