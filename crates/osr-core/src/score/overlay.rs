use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Score, ScoreRank};
use crate::ruleset::{HitResult, Mod, Ruleset};

fn no_online_id() -> i64 {
    -1
}

/// The JSON document stored in the compressed overlay blob of modern
/// exports. It carries everything the fixed legacy fields cannot express.
///
/// Collection fields are `None` when the key is absent from the document, so
/// a partial overlay leaves the matching flat fields alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInfoOverlay {
    #[serde(default = "no_online_id")]
    pub online_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mods: Option<Vec<Mod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<BTreeMap<HitResult, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_statistics: Option<BTreeMap<HitResult, u32>>,
    #[serde(default)]
    pub client_version: Option<String>,
    #[serde(default)]
    pub rank: Option<ScoreRank>,
    #[serde(default)]
    pub user_id: i32,
    #[serde(default)]
    pub total_score_without_mods: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pauses: Option<Vec<i32>>,
}

impl Default for ScoreInfoOverlay {
    fn default() -> Self {
        Self {
            online_id: no_online_id(),
            mods: None,
            statistics: None,
            maximum_statistics: None,
            client_version: None,
            rank: None,
            user_id: 0,
            total_score_without_mods: None,
            pauses: None,
        }
    }
}

impl ScoreInfoOverlay {
    /// Captures the overlay fields of a score. Zero counts are dropped from
    /// both statistics maps.
    pub fn from_score(score: &Score) -> Self {
        Self {
            online_id: score.online_id.unwrap_or(-1),
            mods: Some(score.mods.clone()),
            statistics: Some(non_zero(&score.statistics)),
            maximum_statistics: Some(non_zero(&score.maximum_statistics)),
            client_version: score.client_version.clone(),
            rank: score.rank,
            user_id: score.user_online_id.unwrap_or(0),
            total_score_without_mods: score.total_score_without_mods,
            pauses: Some(score.pauses.clone()),
        }
    }

    /// Applies the overlay to a decoded score.
    ///
    /// Only fields present in the overlay replace the flat ones, in a fixed
    /// order: online id (non-negative only), both statistics maps, mods,
    /// client version, rank, user id (positive only), pauses and finally the
    /// total score without mods, which is derived from the merged mods when
    /// the overlay does not carry it.
    pub fn merge_into(self, score: &mut Score, ruleset: &dyn Ruleset) {
        if self.online_id >= 0 {
            score.online_id = Some(self.online_id);
        }

        if let Some(statistics) = self.statistics {
            score.statistics = statistics;
        }
        if let Some(maximum_statistics) = self.maximum_statistics {
            score.maximum_statistics = maximum_statistics;
        }
        if let Some(mods) = self.mods {
            score.mods = mods;
        }
        if self.client_version.is_some() {
            score.client_version = self.client_version;
        }
        if self.rank.is_some() {
            score.rank = self.rank;
        }

        if self.user_id > 0 {
            score.user_online_id = Some(self.user_id);
        }

        if let Some(pauses) = self.pauses {
            score.pauses = pauses;
        }
        score.total_score_without_mods = Some(
            self.total_score_without_mods
                .unwrap_or_else(|| ruleset.total_score_without_mods(score.total_score, &score.mods)),
        );
    }
}

fn non_zero(statistics: &BTreeMap<HitResult, u32>) -> BTreeMap<HitResult, u32> {
    statistics
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(&result, &count)| (result, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::OsuRuleset;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_document() {
        let overlay: ScoreInfoOverlay = serde_json::from_str("{}").unwrap();
        assert_eq!(overlay, ScoreInfoOverlay::default());
    }

    #[test]
    fn test_parse_full_document() {
        let overlay: ScoreInfoOverlay = serde_json::from_value(json!({
            "online_id": 123,
            "mods": [{ "acronym": "DT", "settings": { "speed_change": 1.3 } }, { "acronym": "HD" }],
            "statistics": { "great": 10, "large_tick_hit": 2 },
            "maximum_statistics": { "great": 12 },
            "client_version": "2024.1.1",
            "rank": "SH",
            "user_id": 7,
            "total_score_without_mods": 900,
            "pauses": [1000, 2000]
        }))
        .unwrap();

        assert_eq!(overlay.online_id, 123);
        let mods = overlay.mods.as_ref().unwrap();
        assert_eq!(mods.len(), 2);
        assert_eq!(mods[0].settings["speed_change"], json!(1.3));
        assert_eq!(overlay.statistics.as_ref().unwrap()[&HitResult::LargeTickHit], 2);
        assert_eq!(overlay.rank, Some(ScoreRank::Sh));
        assert_eq!(overlay.pauses, Some(vec![1000, 2000]));
    }

    #[test]
    fn test_merge_precedence() {
        let mut score = Score {
            online_id: Some(5),
            user_online_id: Some(9),
            total_score: 1000,
            ..Score::default()
        };
        let overlay = ScoreInfoOverlay {
            online_id: -1,
            user_id: 0,
            mods: Some(vec![Mod::new("HD")]),
            statistics: Some(BTreeMap::from([(HitResult::Great, 3)])),
            ..Default::default()
        };

        overlay.merge_into(&mut score, &OsuRuleset);

        assert_eq!(score.online_id, Some(5));
        assert_eq!(score.user_online_id, Some(9));
        assert_eq!(score.mods, vec![Mod::new("HD")]);
        assert_eq!(score.statistics[&HitResult::Great], 3);
        assert_eq!(
            score.total_score_without_mods,
            Some(OsuRuleset.total_score_without_mods(1000, &[Mod::new("HD")]))
        );
    }

    #[test]
    fn test_merge_takes_explicit_values() {
        let mut score = Score::default();
        let overlay = ScoreInfoOverlay {
            online_id: 42,
            user_id: 3,
            total_score_without_mods: Some(777),
            rank: Some(ScoreRank::A),
            ..Default::default()
        };

        overlay.merge_into(&mut score, &OsuRuleset);

        assert_eq!(score.online_id, Some(42));
        assert_eq!(score.user_online_id, Some(3));
        assert_eq!(score.total_score_without_mods, Some(777));
        assert_eq!(score.rank, Some(ScoreRank::A));
    }

    #[test]
    fn test_from_score_drops_zero_counts() {
        let score = Score {
            statistics: BTreeMap::from([(HitResult::Great, 3), (HitResult::Miss, 0)]),
            ..Score::default()
        };
        let overlay = ScoreInfoOverlay::from_score(&score);

        assert_eq!(overlay.statistics.map(|s| s.len()), Some(1));
        assert_eq!(overlay.online_id, -1);
    }

    #[test]
    fn test_partial_overlay_keeps_flat_fields() {
        let mut score = Score {
            mods: vec![Mod::new("HD")],
            statistics: BTreeMap::from([(HitResult::Great, 10), (HitResult::Miss, 2)]),
            client_version: Some("flat".to_string()),
            rank: Some(ScoreRank::B),
            pauses: vec![500],
            ..Score::default()
        };
        let overlay: ScoreInfoOverlay =
            serde_json::from_value(json!({ "client_version": "2024.1.1" })).unwrap();

        overlay.merge_into(&mut score, &OsuRuleset);

        assert_eq!(score.mods, vec![Mod::new("HD")]);
        assert_eq!(score.statistics[&HitResult::Great], 10);
        assert_eq!(score.statistics[&HitResult::Miss], 2);
        assert!(score.maximum_statistics.is_empty());
        assert_eq!(score.client_version.as_deref(), Some("2024.1.1"));
        assert_eq!(score.rank, Some(ScoreRank::B));
        assert_eq!(score.pauses, vec![500]);
    }

    #[test]
    fn test_present_empty_collections_replace() {
        let mut score = Score {
            mods: vec![Mod::new("HD")],
            statistics: BTreeMap::from([(HitResult::Great, 10)]),
            ..Score::default()
        };
        let overlay: ScoreInfoOverlay =
            serde_json::from_value(json!({ "mods": [], "statistics": {} })).unwrap();

        overlay.merge_into(&mut score, &OsuRuleset);

        assert!(score.mods.is_empty());
        assert!(score.statistics.is_empty());
    }
}
