#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use drama_recommender::models::{Drama, RecommendRequest, RecommendationResult, Stats, YearRange};

/// Behaviour knobs of the fake recommendation service
#[derive(Clone, Default)]
pub struct FakeRemote {
    /// Delay before `/api/stats` answers
    pub stats_delay: Duration,
    /// Number of `/api/stats` calls answered with 503 before succeeding
    pub stats_failures: u32,
    /// Answer `/api/recommend` with a non-JSON 500
    pub broken_recommend: bool,
    /// Answer `/api/stats` with null year bounds and rating
    pub sparse_stats: bool,
    /// Number of `/api/stats` calls received
    pub stats_calls: Arc<AtomicU32>,
}

impl FakeRemote {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn stats_calls(&self) -> u32 {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

pub fn remote_stats() -> Stats {
    Stats {
        total_dramas: 250,
        unique_genres: 15,
        year_range: Some(YearRange { min: 2005, max: 2024 }),
        avg_rating: Some(8.1),
    }
}

fn remote_catalog() -> Vec<Drama> {
    (0..60)
        .map(|i| Drama::new(format!("Remote Drama {i}"), "From the service", "Romance, Drama"))
        .collect()
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
}

async fn stats(State(remote): State<FakeRemote>) -> impl IntoResponse {
    let call = remote.stats_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(remote.stats_delay).await;
    if call < remote.stats_failures {
        return (StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response();
    }
    if remote.sparse_stats {
        return Json(json!({
            "total_dramas": 10,
            "unique_genres": 3,
            "year_range": { "min": null, "max": null },
            "avg_rating": null,
        }))
        .into_response();
    }
    Json(remote_stats()).into_response()
}

async fn dramas() -> Json<Vec<Drama>> {
    Json(remote_catalog())
}

async fn search(Query(params): Query<SearchParams>) -> Json<Vec<Drama>> {
    Json(vec![Drama::new(
        format!("Remote match for {}", params.q),
        "",
        "Drama",
    )])
}

async fn recommend(
    State(remote): State<FakeRemote>,
    Json(request): Json<RecommendRequest>,
) -> impl IntoResponse {
    if remote.broken_recommend {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<html>Internal Server Error</html>")
            .into_response();
    }

    if request.title != "Goblin" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("Drama '{}' not found in our database", request.title),
                "suggestions": ["Goblin", "Goblin (Alt)", "Goblin (Re-run)", "Gobi Desert"],
            })),
        )
            .into_response();
    }

    Json(RecommendationResult {
        input_drama: Drama::new("Goblin", "Remote copy", "Fantasy, Romance, Drama"),
        recommendations: vec![
            Drama::new("Doom at Your Service", "", "Fantasy, Romance").with_similarity(0.93),
            Drama::new("Hotel del Luna", "", "Fantasy, Horror").with_similarity(0.88),
        ],
        total_found: 2,
    })
    .into_response()
}

pub fn router(remote: FakeRemote) -> Router {
    Router::new()
        .route("/api/stats", get(stats))
        .route("/api/dramas", get(dramas))
        .route("/api/search", get(search))
        .route("/api/recommend", post(recommend))
        .with_state(remote)
}

/// Serves the fake service on an ephemeral port and returns its base URL
pub async fn spawn_remote(remote: FakeRemote) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(remote)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL where nothing is listening
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
