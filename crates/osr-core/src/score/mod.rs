//! Score model and score-level derivations.
//!
//! This module contains:
//! - `Score` - a decoded score with its optional replay
//! - `ScoreRank` - letter ranks (F, D, C, B, A, S, SH, X, XH)
//! - `LegacyCounts` - the six fixed judgement counters of the container
//! - `ScoreInfoOverlay` - the JSON overlay of modern exports
//! - maximum statistics derivation (see `statistics`)

mod legacy_counts;
mod overlay;
mod rank;
pub mod statistics;

pub use legacy_counts::LegacyCounts;
pub use overlay::ScoreInfoOverlay;
pub use rank::ScoreRank;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::version::{is_legacy_version, total_score_version_for, LATEST_VERSION};
use crate::replay::Replay;
use crate::ruleset::{HitResult, Mod};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Score {
    pub ruleset_id: u8,
    /// Container version the score was decoded from. Read-only after decode.
    pub format_version: i32,
    pub total_score_version: i32,
    pub beatmap_hash: String,
    /// Second hash field of the container, kept verbatim.
    pub replay_hash: String,
    pub online_id: Option<i64>,
    pub legacy_online_id: Option<i64>,
    pub username: String,
    pub user_online_id: Option<i32>,
    pub total_score: i64,
    /// Total score in the legacy scoring format, for legacy scores.
    pub legacy_total_score: Option<i64>,
    pub total_score_without_mods: Option<i64>,
    pub max_combo: u32,
    pub mods: Vec<Mod>,
    pub date: DateTime<Utc>,
    pub statistics: BTreeMap<HitResult, u32>,
    pub maximum_statistics: BTreeMap<HitResult, u32>,
    pub client_version: Option<String>,
    pub rank: Option<ScoreRank>,
    /// Times (ms) at which the player paused.
    pub pauses: Vec<i32>,
    pub replay: Option<Replay>,
}

impl Score {
    /// An empty score at the latest format version.
    pub fn new(ruleset_id: u8) -> Self {
        Self {
            ruleset_id,
            format_version: LATEST_VERSION,
            total_score_version: total_score_version_for(LATEST_VERSION),
            ..Self::default()
        }
    }

    pub fn is_legacy(&self) -> bool {
        is_legacy_version(self.format_version)
    }

    /// Combo a play hitting every object would reach.
    pub fn max_achievable_combo(&self) -> u32 {
        statistics::combo_from(&self.maximum_statistics)
    }

    /// Whether the achieved combo is the maximum achievable one.
    pub fn is_perfect(&self) -> bool {
        self.max_combo == self.max_achievable_combo()
    }

    pub fn legacy_counts(&self) -> LegacyCounts {
        LegacyCounts::from_statistics(self.ruleset_id, &self.statistics)
    }

    pub fn count(&self, result: HitResult) -> u32 {
        self.statistics.get(&result).copied().unwrap_or(0)
    }

    pub fn frame_count(&self) -> usize {
        self.replay.as_ref().map_or(0, Replay::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_score() {
        let score = Score::new(2);

        assert_eq!(score.ruleset_id, 2);
        assert!(!score.is_legacy());
        assert_eq!(score.total_score_version, LATEST_VERSION);
        assert_eq!(score.frame_count(), 0);
    }

    #[test]
    fn test_is_perfect() {
        let mut score = Score::new(0);
        score.maximum_statistics =
            BTreeMap::from([(HitResult::Great, 10), (HitResult::LargeTickHit, 5)]);

        score.max_combo = 15;
        assert!(score.is_perfect());

        score.max_combo = 14;
        assert!(!score.is_perfect());
    }

    #[test]
    fn test_legacy_counts_from_statistics() {
        let mut score = Score::new(0);
        score.statistics = BTreeMap::from([(HitResult::Great, 10), (HitResult::Meh, 2)]);

        let counts = score.legacy_counts();
        assert_eq!(counts.count_300, 10);
        assert_eq!(counts.count_50, 2);
        assert_eq!(score.count(HitResult::Ok), 0);
    }

    #[test]
    fn test_score_json_uses_snake_case_keys() {
        let mut score = Score::new(0);
        score.statistics.insert(HitResult::LargeTickHit, 4);

        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["statistics"]["large_tick_hit"], 4);
    }
}
