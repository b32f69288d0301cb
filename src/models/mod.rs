pub mod connectivity;
pub mod drama;
pub mod stats;

pub use connectivity::{ConnectivitySnapshot, ConnectivityState, FallbackReason};
pub use drama::{
    Drama, RecommendRequest, RecommendationOutcome, RecommendationResult, RemoteErrorBody,
};
pub use stats::{Stats, YearRange};
