use serde::{Deserialize, Serialize};

mod item;
mod recommendation;

pub use item::{Catalog, Item, ItemId};
pub use recommendation::{RankedEntry, RankedResult, SubmissionPayload};

/// Backend readiness as reported by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub movies_loaded: bool,
    pub ratings_loaded: bool,
    #[serde(default)]
    pub movies_count: Option<u64>,
    #[serde(default)]
    pub ratings_count: Option<u64>,
}

impl HealthStatus {
    /// Both the catalog and the rating data are available
    pub fn is_ready(&self) -> bool {
        self.movies_loaded && self.ratings_loaded
    }
}
