//! Title resolution against the anime catalog with retry and pacing.
//!
//! The resolver takes an original list title, searches the catalog with a
//! normalized form of it, and returns the top candidate. Transport failures
//! are retried with a linear backoff; an empty result set is final and is
//! never retried. Per-entry failures never propagate, the caller always
//! gets a `MatchResult` back.

use crate::api::AnimeCandidate;
use crate::normalize::normalize_title;
use anyhow::Result;
use async_trait::async_trait;
use shared::models::MatchResult;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Narrow search interface over the catalog service
///
/// Abstracting the transport keeps the retry and pacing logic testable
/// with a deterministic stub.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for anime matching the query, returning at most `limit` candidates
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<AnimeCandidate>>;
}

/// Resolves source titles to catalog entries
pub struct Resolver<S: SearchProvider> {
    /// Search backend
    provider: S,
    /// Pause after each successful match, and the backoff unit for retries
    delay: Duration,
    /// Total attempts per title before giving up
    max_attempts: u32,
}

impl<S: SearchProvider> Resolver<S> {
    /// Create a new resolver
    pub fn new(provider: S, delay: Duration, max_attempts: u32) -> Self {
        Self {
            provider,
            delay,
            max_attempts,
        }
    }

    /// Resolve a single title to its best catalog match
    ///
    /// Returns `MatchResult::not_found()` when the catalog has no candidate
    /// or when all attempts fail. The post-match sleep keeps request pacing
    /// polite toward the shared service.
    pub async fn resolve(&self, original_title: &str) -> MatchResult {
        let query = normalize_title(original_title);

        for attempt in 1..=self.max_attempts {
            match self.provider.search(&query, 1).await {
                Ok(candidates) => {
                    match candidates.into_iter().next() {
                        Some(top) => {
                            let episodes = top.episodes.unwrap_or(0);
                            info!(
                                title = %original_title,
                                matched = %top.title,
                                mal_id = top.mal_id,
                                episodes = episodes,
                                "Matched title"
                            );
                            sleep(self.delay).await;
                            return MatchResult {
                                mal_id: Some(top.mal_id),
                                title: Some(top.title),
                                episodes: Some(episodes),
                            };
                        }
                        None => {
                            // An empty result set is not transient
                            info!(title = %original_title, "No match found");
                            return MatchResult::not_found();
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        title = %original_title,
                        attempt = attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Search attempt failed"
                    );

                    if attempt < self.max_attempts {
                        let backoff = self.delay * attempt;
                        debug!(backoff_ms = backoff.as_millis(), "Retrying after backoff");
                        sleep(backoff).await;
                    }
                }
            }
        }

        warn!(title = %original_title, "All search attempts exhausted");
        MatchResult::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct SingleHit {
        calls: AtomicU32,
    }

    #[async_trait]
    impl SearchProvider for SingleHit {
        async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<AnimeCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![AnimeCandidate {
                mal_id: 20,
                title: "Naruto".to_string(),
                episodes: Some(220),
            }])
        }
    }

    struct AlwaysEmpty {
        calls: AtomicU32,
    }

    #[async_trait]
    impl SearchProvider for AlwaysEmpty {
        async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<AnimeCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    struct AlwaysFails {
        calls: AtomicU32,
    }

    #[async_trait]
    impl SearchProvider for AlwaysFails {
        async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<AnimeCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection reset"))
        }
    }

    struct FailsOnce {
        calls: AtomicU32,
    }

    #[async_trait]
    impl SearchProvider for FailsOnce {
        async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<AnimeCandidate>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                Err(anyhow!("timeout"))
            } else {
                Ok(vec![AnimeCandidate {
                    mal_id: 1,
                    title: "Cowboy Bebop".to_string(),
                    episodes: None,
                }])
            }
        }
    }

    #[tokio::test]
    async fn test_first_result_wins_with_one_call() {
        let provider = SingleHit {
            calls: AtomicU32::new(0),
        };
        let resolver = Resolver::new(provider, Duration::ZERO, 3);

        let result = resolver.resolve("Naruto (TV)").await;
        assert_eq!(result.mal_id, Some(20));
        assert_eq!(result.title.as_deref(), Some("Naruto"));
        assert_eq!(result.episodes, Some(220));
        assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_results_do_not_retry() {
        let provider = AlwaysEmpty {
            calls: AtomicU32::new(0),
        };
        let resolver = Resolver::new(provider, Duration::ZERO, 3);

        let result = resolver.resolve("Some Obscure OVA").await;
        assert!(!result.is_match());
        assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_exhaust_max_attempts() {
        let provider = AlwaysFails {
            calls: AtomicU32::new(0),
        };
        let resolver = Resolver::new(provider, Duration::ZERO, 3);

        let result = resolver.resolve("Naruto").await;
        assert!(!result.is_match());
        assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let provider = FailsOnce {
            calls: AtomicU32::new(0),
        };
        let resolver = Resolver::new(provider, Duration::ZERO, 3);

        let result = resolver.resolve("Cowboy Bebop").await;
        assert_eq!(result.mal_id, Some(1));
        // Missing episode count falls back to 0
        assert_eq!(result.episodes, Some(0));
        assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 2);
    }
}
