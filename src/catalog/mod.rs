use std::collections::HashSet;
use std::path::Path;

use crate::models::Drama;

/// Sample dataset compiled into the binary
const SAMPLE_CATALOG_JSON: &str = include_str!("../../data/sample_dramas.json");

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate title in catalog: {0}")]
    DuplicateTitle(String),
}

/// Immutable set of drama records
///
/// Used as the fallback corpus for search and recommendations, and as the
/// default browse list. Entry order is preserved from the source data and is
/// significant: local results are always reported in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dramas: Vec<Drama>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate titles
    ///
    /// Similarity scores never live on catalog entries; any found in the
    /// input are dropped.
    pub fn new(dramas: Vec<Drama>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(dramas.len());
        let mut stripped = 0usize;

        let dramas = dramas
            .into_iter()
            .map(|mut drama| {
                if !seen.insert(drama.title.clone()) {
                    return Err(CatalogError::DuplicateTitle(drama.title));
                }
                if drama.similarity_score.take().is_some() {
                    stripped += 1;
                }
                Ok(drama)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if stripped > 0 {
            tracing::warn!(
                count = stripped,
                "Dropped similarity scores found on catalog entries"
            );
        }

        Ok(Self { dramas })
    }

    /// Parses a JSON array of dramas
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let dramas: Vec<Drama> = serde_json::from_str(json)?;
        Self::new(dramas)
    }

    /// Loads a JSON catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&contents)?;

        tracing::info!(
            path = %path.as_ref().display(),
            entries = catalog.len(),
            "Loaded catalog from file"
        );

        Ok(catalog)
    }

    /// The built-in sample catalog
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json_str(SAMPLE_CATALOG_JSON)
    }

    pub fn all(&self) -> &[Drama] {
        &self.dramas
    }

    pub fn len(&self) -> usize {
        self.dramas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dramas.is_empty()
    }

    /// Exact, case-sensitive title lookup
    pub fn find_by_title(&self, title: &str) -> Option<&Drama> {
        self.dramas.iter().find(|drama| drama.title == title)
    }
}
