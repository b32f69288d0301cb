use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    models::{ConnectivitySnapshot, ConnectivityState, Stats},
    services::providers::RecommendationBackend,
};

/// Outcome of a single health check
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub state: ConnectivityState,
    /// Remote corpus stats, present only when connected
    pub stats: Option<Stats>,
}

/// Issues one bounded health check against the remote service
///
/// Never fails: timeouts, transport errors and non-success responses all
/// resolve to `Disconnected`. The remote call is dropped when the timeout
/// fires, so a late answer can never be applied.
pub async fn probe(backend: &dyn RecommendationBackend, timeout: Duration) -> ProbeOutcome {
    match tokio::time::timeout(timeout, backend.fetch_stats()).await {
        Ok(Ok(stats)) => {
            tracing::info!(
                provider = backend.name(),
                total_dramas = stats.total_dramas,
                "Recommendation backend connected"
            );
            ProbeOutcome {
                state: ConnectivityState::Connected,
                stats: Some(stats),
            }
        }
        Ok(Err(e)) => {
            tracing::info!(
                provider = backend.name(),
                error = %e,
                "Recommendation backend not available, using local catalog"
            );
            ProbeOutcome {
                state: ConnectivityState::Disconnected,
                stats: None,
            }
        }
        Err(_) => {
            tracing::info!(
                provider = backend.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Recommendation backend probe timed out, using local catalog"
            );
            ProbeOutcome {
                state: ConnectivityState::Disconnected,
                stats: None,
            }
        }
    }
}

/// Exponential backoff schedule for explicit re-probes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    pub base: Duration,
    pub max: Duration,
    pub max_attempts: u32,
}

impl Backoff {
    /// Delay to wait after the given (0-indexed) failed attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(500),
            max: Duration::from_millis(8000),
            max_attempts: 5,
        }
    }
}

#[derive(Debug, Default)]
struct MonitorInner {
    snapshot: ConnectivitySnapshot,
    remote_stats: Option<Stats>,
}

/// Process-wide connectivity state
///
/// Written by the startup probe (once, while still `Unknown`) and by explicit
/// `reprobe` calls; there is no background retry. Resolvers never read this
/// directly: they receive a `ConnectivitySnapshot` copy per call.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<RwLock<MonitorInner>>,
    reprobe_lock: Arc<Mutex<()>>,
    probe_timeout: Duration,
    backoff: Backoff,
}

impl ConnectivityMonitor {
    pub fn new(probe_timeout: Duration, backoff: Backoff) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MonitorInner::default())),
            reprobe_lock: Arc::new(Mutex::new(())),
            probe_timeout,
            backoff,
        }
    }

    pub async fn snapshot(&self) -> ConnectivitySnapshot {
        self.inner.read().await.snapshot
    }

    /// Stats reported by the last successful probe
    pub async fn remote_stats(&self) -> Option<Stats> {
        self.inner.read().await.remote_stats.clone()
    }

    /// Runs the startup probe
    ///
    /// Only the first completed probe is applied; later calls return the
    /// state already decided.
    pub async fn initialize(&self, backend: &dyn RecommendationBackend) -> ConnectivitySnapshot {
        let current = self.snapshot().await;
        if current.state != ConnectivityState::Unknown {
            return current;
        }

        let outcome = probe(backend, self.probe_timeout).await;

        let mut inner = self.inner.write().await;
        if inner.snapshot.state == ConnectivityState::Unknown {
            Self::apply(&mut inner, outcome, 1);
        }
        inner.snapshot
    }

    /// Re-checks connectivity with exponential backoff
    ///
    /// Stops at the first successful attempt. The final verdict replaces the
    /// current state, whatever it was.
    pub async fn reprobe(&self, backend: &dyn RecommendationBackend) -> ConnectivitySnapshot {
        let _guard = self.reprobe_lock.lock().await;

        let mut attempts = 0;
        let mut outcome = ProbeOutcome {
            state: ConnectivityState::Disconnected,
            stats: None,
        };

        for attempt in 0..self.backoff.max_attempts.max(1) {
            if attempt > 0 {
                tokio::time::sleep(self.backoff.delay_after(attempt - 1)).await;
            }
            attempts += 1;
            outcome = probe(backend, self.probe_timeout).await;
            if outcome.state.is_connected() {
                break;
            }
        }

        tracing::info!(
            state = %outcome.state,
            attempts = attempts,
            "Connectivity re-probed"
        );

        let mut inner = self.inner.write().await;
        Self::apply(&mut inner, outcome, attempts);
        inner.snapshot
    }

    fn apply(inner: &mut MonitorInner, outcome: ProbeOutcome, attempts: u32) {
        inner.snapshot = ConnectivitySnapshot {
            state: outcome.state,
            checked_at: Some(Utc::now()),
            attempts: inner.snapshot.attempts + attempts,
        };
        inner.remote_stats = outcome.stats;
    }
}
