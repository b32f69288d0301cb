pub mod connectivity;
pub mod engine;
pub mod providers;
pub mod recommendations;
pub mod stats;
pub mod title_search;

pub use engine::{EngineSettings, RecommendationEngine};
