mod common;

use std::time::{Duration, Instant};

use drama_recommender::{
    error::BackendError,
    models::ConnectivityState,
    services::{
        connectivity::probe,
        providers::{HttpBackend, RecommendationBackend},
    },
};

use common::{remote_stats, spawn_remote, unreachable_url, FakeRemote};

fn backend(base_url: String) -> HttpBackend {
    HttpBackend::new(base_url, Duration::from_millis(3000)).unwrap()
}

#[tokio::test]
async fn test_probe_connected_returns_remote_stats() {
    let backend = backend(spawn_remote(FakeRemote::healthy()).await);

    let outcome = probe(&backend, Duration::from_millis(3000)).await;
    assert_eq!(outcome.state, ConnectivityState::Connected);
    assert_eq!(outcome.stats, Some(remote_stats()));
}

#[tokio::test]
async fn test_probe_connected_with_null_stats_fields() {
    let remote = FakeRemote {
        sparse_stats: true,
        ..FakeRemote::healthy()
    };
    let backend = backend(spawn_remote(remote).await);

    let outcome = probe(&backend, Duration::from_millis(3000)).await;
    assert_eq!(outcome.state, ConnectivityState::Connected);

    let stats = outcome.stats.unwrap();
    assert_eq!(stats.total_dramas, 10);
    assert_eq!(stats.year_range, None);
    assert_eq!(stats.avg_rating, None);
}

#[tokio::test]
async fn test_probe_unreachable_is_disconnected() {
    let backend = backend(unreachable_url().await);

    let outcome = probe(&backend, Duration::from_millis(3000)).await;
    assert_eq!(outcome.state, ConnectivityState::Disconnected);
    assert_eq!(outcome.stats, None);
}

#[tokio::test]
async fn test_probe_non_success_is_disconnected() {
    let remote = FakeRemote {
        stats_failures: 1,
        ..FakeRemote::healthy()
    };
    let backend = backend(spawn_remote(remote).await);

    let outcome = probe(&backend, Duration::from_millis(3000)).await;
    assert_eq!(outcome.state, ConnectivityState::Disconnected);
}

#[tokio::test]
async fn test_probe_returns_at_timeout_not_at_response() {
    let remote = FakeRemote {
        stats_delay: Duration::from_millis(2500),
        ..FakeRemote::healthy()
    };
    let backend = backend(spawn_remote(remote).await);

    let started = Instant::now();
    let outcome = probe(&backend, Duration::from_millis(300)).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.state, ConnectivityState::Disconnected);
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(2000), "probe took {elapsed:?}");
}

#[tokio::test]
async fn test_search_passes_raw_query() {
    let backend = backend(spawn_remote(FakeRemote::healthy()).await);

    let results = backend.search("Crash Landing & co").await.unwrap();
    assert_eq!(results[0].title, "Remote match for Crash Landing & co");
}

#[tokio::test]
async fn test_recommend_rejection_is_structured() {
    let backend = backend(spawn_remote(FakeRemote::healthy()).await);

    match backend.recommend("Gobln").await {
        Err(BackendError::Rejected {
            message,
            suggestions,
        }) => {
            assert_eq!(message, "Drama 'Gobln' not found in our database");
            assert_eq!(suggestions.len(), 4);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_recommend_non_json_failure_is_transport() {
    let remote = FakeRemote {
        broken_recommend: true,
        ..FakeRemote::healthy()
    };
    let backend = backend(spawn_remote(remote).await);

    let err = backend.recommend("Goblin").await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_calls_are_transport_errors() {
    let backend = backend(unreachable_url().await);

    assert!(backend.search("goblin").await.unwrap_err().is_transport());
    assert!(backend.list_dramas().await.unwrap_err().is_transport());
    assert!(backend.recommend("Goblin").await.unwrap_err().is_transport());
}
