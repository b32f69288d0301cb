use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A drama catalog entry
///
/// The title is the natural key: there is no separate numeric id, and a
/// catalog never holds two entries with the same title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drama {
    pub title: String,
    pub synopsis: String,
    /// Comma-separated genre labels, in display order
    pub genres: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Opaque episode label (not always numeric)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Only ever set on copies handed out as recommendations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

impl Drama {
    /// Creates an entry with only the required fields set
    pub fn new(title: impl Into<String>, synopsis: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            synopsis: synopsis.into(),
            genres: genres.into(),
            rating: None,
            year: None,
            episodes: None,
            network: None,
            similarity_score: None,
        }
    }

    /// Genre labels in display order, trimmed, empty labels dropped
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect()
    }

    /// Genre labels normalized for matching (trimmed and lowercased)
    pub fn genre_tokens(&self) -> HashSet<String> {
        self.genre_list()
            .into_iter()
            .map(str::to_lowercase)
            .collect()
    }

    /// True when both entries share at least one normalized genre
    pub fn shares_genre_with(&self, other: &Drama) -> bool {
        let mine = self.genre_tokens();
        other.genre_tokens().iter().any(|token| mine.contains(token))
    }

    /// Returns a copy carrying a similarity score, for presentation
    pub fn with_similarity(&self, score: f64) -> Drama {
        Drama {
            similarity_score: Some(score),
            ..self.clone()
        }
    }
}

/// Result of a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub input_drama: Drama,
    pub recommendations: Vec<Drama>,
    pub total_found: usize,
}

/// Recommendation result together with a non-fatal advisory
///
/// The advisory is set when recommendations were still produced but only
/// approximately, e.g. after the remote service failed for this call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub result: RecommendationResult,
    pub advisory: Option<String>,
}

impl RecommendationOutcome {
    pub fn exact(result: RecommendationResult) -> Self {
        Self {
            result,
            advisory: None,
        }
    }

    pub fn approximate(result: RecommendationResult, advisory: impl Into<String>) -> Self {
        Self {
            result,
            advisory: Some(advisory.into()),
        }
    }
}

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub title: String,
}

/// Structured error body returned by the remote service
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}
