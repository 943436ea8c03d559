//! Jikan API v4 response types.
//!
//! These types represent the JSON responses from the Jikan API. Only the
//! fields the converter needs are modelled; the rest of the payload is
//! ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Response envelope for the anime search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<AnimeCandidate>,
}

/// A single anime returned by a search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeCandidate {
    pub mal_id: u32,
    pub title: String,
    #[serde(default)]
    pub episodes: Option<u32>,
}
