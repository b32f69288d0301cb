use std::time::Duration;

use crate::{
    catalog::Catalog,
    error::RecommendError,
    models::{ConnectivityState, Drama, FallbackReason, RecommendationOutcome, RecommendationResult},
    services::providers::RecommendationBackend,
};

/// Advisory shown when the remote call failed but local results are shown
pub const TRANSPORT_ADVISORY: &str = "Failed to connect to backend. Using sample recommendations.";

/// Candidate pool and score schedule of the local heuristic
struct LocalPlan {
    require_shared_genre: bool,
    limit: usize,
    /// Score of the first candidate, in hundredths
    start_score: u32,
}

impl LocalPlan {
    fn for_reason(reason: FallbackReason) -> Self {
        match reason {
            FallbackReason::NeverConnected => Self {
                require_shared_genre: true,
                limit: 5,
                start_score: 90,
            },
            FallbackReason::ConnectedButCallFailed => Self {
                require_shared_genre: false,
                limit: 10,
                start_score: 80,
            },
        }
    }
}

/// Rank-based placeholder score: `start - 0.05 * rank`
///
/// Computed in hundredths so that the scores are exact decimals.
fn synthetic_score(start_score: u32, rank: usize) -> f64 {
    let hundredths = start_score as i64 - 5 * rank as i64;
    hundredths as f64 / 100.0
}

/// Approximate recommendations computed from the catalog alone
///
/// This is not a similarity model. Candidates keep catalog order and get
/// decreasing synthetic scores. With `NeverConnected`, only entries sharing a
/// normalized genre with the selected drama are candidates (at most 5,
/// scores from 0.90); with `ConnectedButCallFailed`, every other entry is
/// (at most 10, scores from 0.80).
pub fn local_recommendations(
    catalog: &Catalog,
    title: &str,
    reason: FallbackReason,
) -> Result<RecommendationResult, RecommendError> {
    let input = catalog
        .find_by_title(title)
        .ok_or_else(|| RecommendError::LocalNotFound {
            title: title.to_string(),
        })?;
    let plan = LocalPlan::for_reason(reason);

    let recommendations: Vec<Drama> = catalog
        .all()
        .iter()
        .filter(|drama| drama.title != input.title)
        .filter(|drama| !plan.require_shared_genre || input.shares_genre_with(drama))
        .take(plan.limit)
        .enumerate()
        .map(|(rank, drama)| drama.with_similarity(synthetic_score(plan.start_score, rank)))
        .collect();

    Ok(RecommendationResult {
        input_drama: input.clone(),
        total_found: recommendations.len(),
        recommendations,
    })
}

/// Resolves recommendations for a selected title
///
/// When connected, the remote answer is returned as-is. A structured remote
/// failure is surfaced as `NotFound` with its suggestions and no results. A
/// transport failure degrades to the broad local heuristic and carries
/// `TRANSPORT_ADVISORY`. When not connected, the genre-based local heuristic
/// answers after `fallback_delay`; the delay is an async sleep and does not
/// hold up other requests.
pub async fn recommend_for_title(
    backend: &dyn RecommendationBackend,
    catalog: &Catalog,
    state: ConnectivityState,
    title: &str,
    fallback_delay: Duration,
) -> Result<RecommendationOutcome, RecommendError> {
    if !state.is_connected() {
        tokio::time::sleep(fallback_delay).await;
        let result = local_recommendations(catalog, title, FallbackReason::NeverConnected)?;
        return Ok(RecommendationOutcome::exact(result));
    }

    match backend.recommend(title).await {
        Ok(result) => Ok(RecommendationOutcome::exact(result)),
        Err(e) if e.is_transport() => {
            tracing::warn!(
                title = %title,
                error = %e,
                provider = backend.name(),
                "Recommendation request failed, using sample recommendations"
            );
            let result =
                local_recommendations(catalog, title, FallbackReason::ConnectedButCallFailed)?;
            Ok(RecommendationOutcome::approximate(result, TRANSPORT_ADVISORY))
        }
        Err(e) => {
            tracing::info!(
                title = %title,
                error = %e,
                "Recommendation request rejected by backend"
            );
            Err(e.into())
        }
    }
}
