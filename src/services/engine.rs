use std::sync::Arc;
use std::time::Duration;

use crate::{
    catalog::Catalog,
    config::Config,
    error::RecommendError,
    models::{ConnectivitySnapshot, Drama, RecommendationOutcome, Stats},
    services::{
        connectivity::{Backoff, ConnectivityMonitor},
        providers::RecommendationBackend,
        recommendations, stats,
        title_search::{self, SearchPolicy},
    },
};

/// Tunables of the engine, usually derived from `Config`
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub probe_timeout: Duration,
    pub fallback_delay: Duration,
    pub search_policy: SearchPolicy,
    pub browse_limit: usize,
    pub backoff: Backoff,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            probe_timeout: config.probe_timeout(),
            fallback_delay: config.fallback_delay(),
            search_policy: SearchPolicy {
                min_chars: config.min_search_chars,
            },
            browse_limit: config.browse_limit,
            backoff: Backoff {
                base: Duration::from_millis(config.reprobe_base_delay_ms),
                max: Duration::from_millis(config.reprobe_max_delay_ms),
                max_attempts: config.reprobe_max_attempts,
            },
        }
    }
}

/// Connectivity-aware recommendation engine
///
/// Each operation takes a snapshot of the connectivity state and hands it to
/// the resolvers, so an operation never observes a state change halfway
/// through. Operations hold no lock while they run and may overlap freely.
#[derive(Clone)]
pub struct RecommendationEngine {
    backend: Arc<dyn RecommendationBackend>,
    catalog: Arc<Catalog>,
    connectivity: ConnectivityMonitor,
    local_stats: Stats,
    settings: EngineSettings,
}

impl RecommendationEngine {
    pub fn new(
        backend: Arc<dyn RecommendationBackend>,
        catalog: Catalog,
        settings: EngineSettings,
    ) -> Self {
        let local_stats = stats::compute_local_stats(&catalog);

        Self {
            backend,
            catalog: Arc::new(catalog),
            connectivity: ConnectivityMonitor::new(settings.probe_timeout, settings.backoff),
            local_stats,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn connectivity(&self) -> ConnectivitySnapshot {
        self.connectivity.snapshot().await
    }

    /// Startup health check; applied once per process
    pub async fn probe(&self) -> ConnectivitySnapshot {
        self.connectivity.initialize(self.backend.as_ref()).await
    }

    /// Explicit re-check with backoff
    pub async fn reprobe(&self) -> ConnectivitySnapshot {
        self.connectivity.reprobe(self.backend.as_ref()).await
    }

    /// Remote stats when connected, local stats otherwise
    pub async fn stats(&self) -> Stats {
        let snapshot = self.connectivity().await;
        if snapshot.state.is_connected() {
            if let Some(remote) = self.connectivity.remote_stats().await {
                return remote;
            }
        }
        self.local_stats.clone()
    }

    pub async fn browse(&self) -> Vec<Drama> {
        let snapshot = self.connectivity().await;
        title_search::browse_dramas(
            self.backend.as_ref(),
            &self.catalog,
            snapshot.state,
            self.settings.browse_limit,
        )
        .await
    }

    pub async fn search(&self, query: &str) -> Vec<Drama> {
        let snapshot = self.connectivity().await;
        title_search::search_dramas(self.backend.as_ref(), &self.catalog, snapshot.state, query)
            .await
    }

    /// List to show for the current search box contents
    ///
    /// Queries below the search threshold show the browse list unfiltered.
    pub async fn visible_dramas(&self, query: &str) -> Vec<Drama> {
        if self.settings.search_policy.should_search(query) {
            self.search(query).await
        } else {
            self.browse().await
        }
    }

    pub async fn recommend(&self, title: &str) -> Result<RecommendationOutcome, RecommendError> {
        let snapshot = self.connectivity().await;
        recommendations::recommend_for_title(
            self.backend.as_ref(),
            &self.catalog,
            snapshot.state,
            title,
            self.settings.fallback_delay,
        )
        .await
    }
}
