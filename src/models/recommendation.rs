use serde::{Deserialize, Serialize};

use super::ItemId;

/// One recommended movie; its position in the result is its rank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub title: String,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

impl RankedEntry {
    #[cfg(test)]
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            genres: None,
            avg_rating: None,
        }
    }
}

/// Ranked recommendations for one submission, best first
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct RankedResult {
    entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn new(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    /// Parses a response body; an empty body or `null` means no results
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries: Option<Vec<RankedEntry>> = serde_json::from_str(body)?;
        Ok(Self::new(entries.unwrap_or_default()))
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Request body for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionPayload {
    pub selected_movies: Vec<ItemId>,
}
