//! Mapping source entries to export records.
//!
//! Source lists carry free-text status labels and a 0-5 rating scale.
//! The export schema wants numeric status codes and a 0-10 integer score,
//! so both get normalized here before the record is assembled.

use shared::models::{AnimeRecord, MatchResult, SourceEntry, WatchStatus};

/// Map a free-text status label to a watch status
///
/// Matching is case-insensitive; anything unrecognized lands on
/// `PlanToWatch`, the safest default for an import.
pub fn convert_status(status: &str) -> WatchStatus {
    match status.to_lowercase().as_str() {
        "watching" => WatchStatus::Watching,
        "watched" | "completed" => WatchStatus::Completed,
        "on-hold" => WatchStatus::OnHold,
        "dropped" => WatchStatus::Dropped,
        "plan to watch" | "want to watch" => WatchStatus::PlanToWatch,
        _ => WatchStatus::PlanToWatch,
    }
}

/// Convert a 0-5 source rating to the 0-10 export scale
///
/// Doubles the rating and rounds to the nearest integer, capped at 10 so
/// a source already on a 0-10 scale cannot overflow the schema.
pub fn convert_score(rating: f64) -> u8 {
    if rating <= 0.0 {
        0
    } else {
        ((rating * 2.0).round() as u32).min(10) as u8
    }
}

/// Build an export record from a source entry and its catalog match
///
/// Returns `None` when the match is empty; the caller routes those
/// entries to the skip list.
pub fn build_record(entry: &SourceEntry, matched: &MatchResult) -> Option<AnimeRecord> {
    let mal_id = matched.mal_id?;
    let episodes = matched.episodes.unwrap_or(0);
    let score = convert_score(entry.rating.unwrap_or(0.0));
    let status = convert_status(entry.status.as_deref().unwrap_or_default());

    Some(AnimeRecord::new(mal_id, episodes, score, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_codes() {
        assert_eq!(convert_status("watching").code(), 1);
        assert_eq!(convert_status("watched").code(), 2);
        assert_eq!(convert_status("completed").code(), 2);
        assert_eq!(convert_status("on-hold").code(), 3);
        assert_eq!(convert_status("dropped").code(), 4);
        assert_eq!(convert_status("plan to watch").code(), 6);
        assert_eq!(convert_status("want to watch").code(), 6);
    }

    #[test]
    fn test_status_mapping_is_case_insensitive() {
        assert_eq!(convert_status("Watching").code(), 1);
        assert_eq!(convert_status("COMPLETED").code(), 2);
        assert_eq!(convert_status("On-Hold").code(), 3);
    }

    #[test]
    fn test_status_mapping_is_total() {
        for status in ["", "rewatching", "paused", "???", "plan-to-watch"] {
            let code = convert_status(status).code();
            assert!([1, 2, 3, 4, 6].contains(&code));
        }
        assert_eq!(convert_status("unknown label").code(), 6);
    }

    #[test]
    fn test_score_doubles_and_rounds() {
        assert_eq!(convert_score(0.0), 0);
        assert_eq!(convert_score(4.5), 9);
        assert_eq!(convert_score(3.7), 7);
        assert_eq!(convert_score(5.0), 10);
    }

    #[test]
    fn test_score_clamps_to_schema_range() {
        assert_eq!(convert_score(8.0), 10);
        assert_eq!(convert_score(-2.0), 0);
    }

    #[test]
    fn test_build_record_requires_a_match() {
        let entry = SourceEntry {
            name: Some("Naruto".to_string()),
            rating: Some(4.0),
            status: Some("watching".to_string()),
        };
        assert!(build_record(&entry, &MatchResult::not_found()).is_none());
    }

    #[test]
    fn test_build_record_maps_all_fields() {
        let entry = SourceEntry {
            name: Some("Naruto".to_string()),
            rating: Some(4.0),
            status: Some("watching".to_string()),
        };
        let matched = MatchResult {
            mal_id: Some(20),
            title: Some("Naruto".to_string()),
            episodes: Some(220),
        };

        let record = build_record(&entry, &matched).unwrap();
        assert_eq!(record.series_animedb_id, 20);
        assert_eq!(record.my_watched_episodes, 220);
        assert_eq!(record.my_score, 8);
        assert_eq!(record.my_status.code(), 1);
        assert_eq!(record.my_start_date, "0000-00-00");
        assert_eq!(record.update_on_import, 1);
    }

    #[test]
    fn test_build_record_defaults_for_sparse_entries() {
        let entry = SourceEntry {
            name: Some("Cowboy Bebop".to_string()),
            rating: None,
            status: None,
        };
        let matched = MatchResult {
            mal_id: Some(1),
            title: Some("Cowboy Bebop".to_string()),
            episodes: None,
        };

        let record = build_record(&entry, &matched).unwrap();
        assert_eq!(record.my_watched_episodes, 0);
        assert_eq!(record.my_score, 0);
        assert_eq!(record.my_status.code(), 6);
    }
}
