use crate::{
    catalog::Catalog,
    models::{ConnectivityState, Drama},
    services::providers::RecommendationBackend,
};

/// Caller-side rule for when a query is worth searching
///
/// Shorter queries mean "no active search": the browse list is shown
/// unfiltered instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    pub min_chars: usize,
}

impl SearchPolicy {
    pub fn should_search(&self, query: &str) -> bool {
        query.chars().count() >= self.min_chars
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self { min_chars: 3 }
    }
}

/// Case-insensitive substring match on titles, in catalog order
pub fn filter_by_title(catalog: &Catalog, query: &str) -> Vec<Drama> {
    let needle = query.to_lowercase();
    catalog
        .all()
        .iter()
        .filter(|drama| drama.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Resolves a search query to a list of dramas
///
/// Delegates to the remote service when connected. A failed remote call is
/// logged and answered from the local catalog instead of with an empty list.
/// An empty query returns the whole catalog.
pub async fn search_dramas(
    backend: &dyn RecommendationBackend,
    catalog: &Catalog,
    state: ConnectivityState,
    query: &str,
) -> Vec<Drama> {
    if query.is_empty() {
        return catalog.all().to_vec();
    }

    if state.is_connected() {
        match backend.search(query).await {
            Ok(dramas) => return dramas,
            Err(e) => {
                tracing::warn!(
                    query = %query,
                    error = %e,
                    provider = backend.name(),
                    "Remote search failed, filtering local catalog"
                );
            }
        }
    }

    filter_by_title(catalog, query)
}

/// Default browse list
///
/// The remote list is truncated to `limit`; the local catalog is returned
/// whole.
pub async fn browse_dramas(
    backend: &dyn RecommendationBackend,
    catalog: &Catalog,
    state: ConnectivityState,
    limit: usize,
) -> Vec<Drama> {
    if state.is_connected() {
        match backend.list_dramas().await {
            Ok(mut dramas) => {
                dramas.truncate(limit);
                return dramas;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = backend.name(),
                    "Failed to fetch dramas, showing local catalog"
                );
            }
        }
    }

    catalog.all().to_vec()
}
