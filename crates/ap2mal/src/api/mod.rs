//! Jikan API v4 client implementation.
//!
//! This module provides an HTTP client for the anime search endpoint of the
//! Jikan API (MyAnimeList unofficial API).

pub mod client;
pub mod types;

pub use client::JikanClient;
pub use types::{AnimeCandidate, SearchResponse};
