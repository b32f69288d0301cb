/// Remote recommendation service abstraction
///
/// The engine only consumes a contract: health/stats, a browse list, title
/// search, and "given a title, return ranked similar items or a typed error".
/// How the service computes similarity is opaque. Implementations must report
/// unreachable services as transport errors (see `BackendError::is_transport`)
/// so that callers can degrade to the local catalog.
use crate::{
    error::BackendResult,
    models::{Drama, RecommendationResult, Stats},
};

pub mod http;

pub use http::HttpBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Health check; success carries the service's corpus stats
    async fn fetch_stats(&self) -> BackendResult<Stats>;

    /// Catalog browse list
    async fn list_dramas(&self) -> BackendResult<Vec<Drama>>;

    /// Full-text search with the raw query
    async fn search(&self, query: &str) -> BackendResult<Vec<Drama>>;

    /// Ranked similar items for a title
    ///
    /// A structured failure (e.g. unknown title) is reported as
    /// `BackendError::Rejected` with the service's message and suggestions.
    async fn recommend(&self, title: &str) -> BackendResult<RecommendationResult>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
