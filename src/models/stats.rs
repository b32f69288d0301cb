use serde::{Deserialize, Deserializer, Serialize};

/// Aggregate view over the active corpus
///
/// Either reported by the remote service or computed locally over the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_dramas: usize,
    pub unique_genres: usize,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_year_range"
    )]
    pub year_range: Option<YearRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Year bounds as the remote service reports them; either side may be null
#[derive(Deserialize)]
struct RemoteYearRange {
    #[serde(default)]
    min: Option<i32>,
    #[serde(default)]
    max: Option<i32>,
}

/// A range with a missing bound means the corpus has no year data
fn deserialize_year_range<'de, D>(deserializer: D) -> Result<Option<YearRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RemoteYearRange>::deserialize(deserializer)?;
    Ok(raw.and_then(|range| match (range.min, range.max) {
        (Some(min), Some(max)) => Some(YearRange { min, max }),
        _ => None,
    }))
}
