use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ConnectivitySnapshot, Drama, RecommendRequest, RecommendationResult, Stats},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    #[serde(flatten)]
    pub result: RecommendationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current connectivity to the remote recommendation service
pub async fn get_connectivity(State(state): State<AppState>) -> Json<ConnectivitySnapshot> {
    Json(state.engine.connectivity().await)
}

/// Re-check connectivity with backoff
pub async fn reprobe(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ConnectivitySnapshot> {
    tracing::info!(request_id = %request_id, "Re-probing recommendation backend");
    Json(state.engine.reprobe().await)
}

/// Corpus stats
pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.engine.stats().await)
}

/// Browse list, filtered once the query is long enough
pub async fn get_dramas(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Drama>> {
    Json(state.engine.visible_dramas(&params.q).await)
}

/// Title search, without the minimum-length rule
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Drama>> {
    Json(state.engine.search(&params.q).await)
}

/// Recommendations for a selected title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Json(request) = payload?;
    // Titles are matched exactly; whitespace only decides emptiness
    let title = request.title.as_str();
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %title,
        "Processing recommendation request"
    );

    let outcome = state.engine.recommend(title).await?;

    tracing::info!(
        request_id = %request_id,
        total_found = outcome.result.total_found,
        approximate = outcome.advisory.is_some(),
        "Recommendation completed"
    );

    Ok(Json(RecommendResponse {
        result: outcome.result,
        advisory: outcome.advisory,
    }))
}
