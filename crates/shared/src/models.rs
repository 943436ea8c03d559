//! Data models for the converter.
//!
//! This module defines the structures flowing through the pipeline: source
//! entries from the JSON export, resolution results from the catalog search,
//! and the records that end up in the MAL import document.

use serde::{Deserialize, Serialize};

/// Placeholder used for the start/finish dates the source export does not carry
pub const PLACEHOLDER_DATE: &str = "0000-00-00";

/// One entry of the source export
///
/// Only `name` matters structurally; entries without one are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub status: Option<String>,
}

/// Outcome of resolving one title against the catalog
///
/// All fields absent means "no match found" and routes the title to the
/// skip list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub mal_id: Option<u32>,
    pub title: Option<String>,
    pub episodes: Option<u32>,
}

impl MatchResult {
    /// The sentinel returned when resolution failed or found nothing
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Whether the resolver found a catalog entry
    pub fn is_match(&self) -> bool {
        self.mal_id.is_some()
    }
}

/// Watch-progress status in the MAL import schema
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl WatchStatus {
    /// Numeric status code used by the importer
    pub fn code(&self) -> u8 {
        match self {
            WatchStatus::Watching => 1,
            WatchStatus::Completed => 2,
            WatchStatus::OnHold => 3,
            WatchStatus::Dropped => 4,
            WatchStatus::PlanToWatch => 6,
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchStatus::Watching => write!(f, "watching"),
            WatchStatus::Completed => write!(f, "completed"),
            WatchStatus::OnHold => write!(f, "on-hold"),
            WatchStatus::Dropped => write!(f, "dropped"),
            WatchStatus::PlanToWatch => write!(f, "plan to watch"),
        }
    }
}

/// One `anime` element of the MAL import document
///
/// Field order matches the document order expected by the importer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub series_animedb_id: u32,
    pub my_id: u32,
    pub my_watched_episodes: u32,
    pub my_start_date: String,
    pub my_finish_date: String,
    pub my_score: u8,
    pub my_status: WatchStatus,
    pub my_times_watched: u32,
    pub my_rewatch_value: u32,
    pub update_on_import: u8,
}

impl AnimeRecord {
    /// Build a record with the constant fields the importer expects
    ///
    /// `update_on_import` is fixed to 1 so re-imports overwrite existing
    /// list entries instead of being ignored.
    pub fn new(series_animedb_id: u32, watched_episodes: u32, score: u8, status: WatchStatus) -> Self {
        Self {
            series_animedb_id,
            my_id: 0,
            my_watched_episodes: watched_episodes,
            my_start_date: PLACEHOLDER_DATE.to_string(),
            my_finish_date: PLACEHOLDER_DATE.to_string(),
            my_score: score,
            my_status: status,
            my_times_watched: 0,
            my_rewatch_value: 0,
            update_on_import: 1,
        }
    }
}
