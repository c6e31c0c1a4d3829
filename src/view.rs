use std::fmt::Display;

use crate::{
    models::{RankedEntry, RankedResult},
    session::SessionEvent,
};

pub const RESULTS_HEADING: &str = "Top recommendations";
pub const UNKNOWN_GENRE: &str = "Unknown genre";
pub const NO_RECOMMENDATIONS: &str = "No recommendations could be generated";

/// A rendered recommendation row
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    /// 1-based rank
    pub rank: usize,
    pub title: String,
    pub genres_or_default: String,
    /// Present only when the entry has an average rating
    pub rating_badge: Option<String>,
}

impl DisplayEntry {
    fn from_ranked(position: usize, entry: &RankedEntry) -> Self {
        let genres_or_default = entry
            .genres
            .as_deref()
            .map(str::trim)
            .filter(|genres| !genres.is_empty())
            .unwrap_or(UNKNOWN_GENRE)
            .to_string();

        Self {
            rank: position + 1,
            title: entry.title.clone(),
            genres_or_default,
            rating_badge: entry.avg_rating.map(|rating| format!("★ {}", rating)),
        }
    }
}

/// What the results screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayModel {
    /// Placeholder shown instead of an empty list
    NoRecommendations { message: String },
    Ranked {
        heading: String,
        entries: Vec<DisplayEntry>,
    },
}

impl DisplayModel {
    pub fn entries(&self) -> &[DisplayEntry] {
        match self {
            DisplayModel::NoRecommendations { .. } => &[],
            DisplayModel::Ranked { entries, .. } => entries,
        }
    }
}

impl Display for DisplayModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayModel::NoRecommendations { message } => write!(f, "{}", message),
            DisplayModel::Ranked { heading, entries } => {
                write!(f, "{}", heading)?;
                for entry in entries {
                    write!(f, "\n{:>2}. {} [{}]", entry.rank, entry.title, entry.genres_or_default)?;
                    if let Some(badge) = &entry.rating_badge {
                        write!(f, " {}", badge)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Results screen: a pure renderer plus the back action
pub struct ResultsView;

impl ResultsView {
    pub fn render(data: &RankedResult) -> DisplayModel {
        if data.is_empty() {
            return DisplayModel::NoRecommendations {
                message: NO_RECOMMENDATIONS.to_string(),
            };
        }

        DisplayModel::Ranked {
            heading: RESULTS_HEADING.to_string(),
            entries: data
                .entries()
                .iter()
                .enumerate()
                .map(|(position, entry)| DisplayEntry::from_ranked(position, entry))
                .collect(),
        }
    }

    /// Leaves the results screen; the session resets the selection
    pub fn back() -> SessionEvent {
        SessionEvent::BackRequested
    }
}
