//! Maximum statistics derivation for scores that were stored without them.

use std::collections::BTreeMap;

use tracing::debug;

use super::Score;
use crate::ruleset::{HitResult, Ruleset};

/// Sum of the counts that contribute to combo.
pub fn combo_from(statistics: &BTreeMap<HitResult, u32>) -> u32 {
    statistics
        .iter()
        .filter(|(result, _)| result.affects_combo())
        .fold(0u32, |acc, (_, &count)| acc.saturating_add(count))
}

/// The judgement a perfect play would have produced in place of `result`.
///
/// Returns `None` for kinds that never appear in maximum statistics.
pub fn max_result_for(result: HitResult, ruleset: &dyn Ruleset) -> Option<HitResult> {
    match result {
        HitResult::LargeTickHit | HitResult::LargeTickMiss => Some(HitResult::LargeTickHit),
        HitResult::SmallTickHit | HitResult::SmallTickMiss => Some(HitResult::SmallTickHit),
        HitResult::SliderTailHit => Some(HitResult::SliderTailHit),
        HitResult::SmallBonus
        | HitResult::LargeBonus
        | HitResult::IgnoreHit
        | HitResult::IgnoreMiss
        | HitResult::ComboBreak
        | HitResult::None
        | HitResult::LegacyComboIncrease => None,
        _ => Some(ruleset.max_basic_result()),
    }
}

/// Builds maximum statistics out of achieved statistics.
pub fn derive_maximum_statistics(
    statistics: &BTreeMap<HitResult, u32>,
    ruleset: &dyn Ruleset,
) -> BTreeMap<HitResult, u32> {
    let mut maximum = BTreeMap::new();

    for (&result, &count) in statistics {
        if count == 0 {
            continue;
        }
        if let Some(max_result) = max_result_for(result, ruleset) {
            let entry = maximum.entry(max_result).or_insert(0u32);
            *entry = entry.saturating_add(count);
        }
    }

    maximum
}

/// Fills `score.maximum_statistics` unless it already holds counts.
///
/// Legacy scores never recorded slider ticks in full, so their combo can
/// exceed what the statistics account for. When `difficulty_max_combo` is
/// known, the shortfall is stored as `LegacyComboIncrease`.
pub fn populate_maximum_statistics(
    score: &mut Score,
    ruleset: &dyn Ruleset,
    difficulty_max_combo: Option<u32>,
) {
    let existing: u64 = score.maximum_statistics.values().map(|&v| u64::from(v)).sum();
    if existing > 0 {
        return;
    }

    score.maximum_statistics = derive_maximum_statistics(&score.statistics, ruleset);

    if !score.is_legacy() {
        return;
    }

    let Some(max_combo) = difficulty_max_combo else {
        return;
    };

    let statistics_combo = combo_from(&score.maximum_statistics);
    if max_combo > statistics_combo {
        let shortfall = max_combo - statistics_combo;
        debug!(
            "Padding legacy maximum statistics with {} combo increases",
            shortfall
        );
        score
            .maximum_statistics
            .insert(HitResult::LegacyComboIncrease, shortfall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::version::{FIRST_LAZER_VERSION, LATEST_VERSION};
    use crate::ruleset::{CatchRuleset, ManiaRuleset, OsuRuleset};

    fn score(format_version: i32, statistics: &[(HitResult, u32)]) -> Score {
        Score {
            format_version,
            statistics: statistics.iter().copied().collect(),
            ..Score::default()
        }
    }

    #[test]
    fn test_basic_results_fold_into_best() {
        let statistics = BTreeMap::from([
            (HitResult::Great, 10),
            (HitResult::Ok, 3),
            (HitResult::Miss, 2),
            (HitResult::LargeTickMiss, 1),
            (HitResult::LargeTickHit, 4),
            (HitResult::SmallBonus, 9),
        ]);
        let maximum = derive_maximum_statistics(&statistics, &OsuRuleset);

        assert_eq!(
            maximum,
            BTreeMap::from([(HitResult::Great, 15), (HitResult::LargeTickHit, 5)])
        );
    }

    #[test]
    fn test_mania_folds_into_perfect() {
        let statistics = BTreeMap::from([(HitResult::Great, 10), (HitResult::Good, 2)]);
        let maximum = derive_maximum_statistics(&statistics, &ManiaRuleset);

        assert_eq!(maximum, BTreeMap::from([(HitResult::Perfect, 12)]));
    }

    #[test]
    fn test_small_ticks() {
        let statistics = BTreeMap::from([
            (HitResult::SmallTickHit, 8),
            (HitResult::SmallTickMiss, 2),
        ]);
        let maximum = derive_maximum_statistics(&statistics, &CatchRuleset);

        assert_eq!(maximum, BTreeMap::from([(HitResult::SmallTickHit, 10)]));
    }

    #[test]
    fn test_existing_maximum_kept() {
        let mut score = score(LATEST_VERSION, &[(HitResult::Great, 10)]);
        score.maximum_statistics.insert(HitResult::Great, 12);

        populate_maximum_statistics(&mut score, &OsuRuleset, Some(100));
        assert_eq!(score.maximum_statistics[&HitResult::Great], 12);
        assert!(!score.maximum_statistics.contains_key(&HitResult::LegacyComboIncrease));
    }

    #[test]
    fn test_legacy_padding() {
        let mut score = score(20_140_721, &[(HitResult::Great, 10), (HitResult::Miss, 2)]);

        populate_maximum_statistics(&mut score, &OsuRuleset, Some(20));
        assert_eq!(score.maximum_statistics[&HitResult::Great], 12);
        assert_eq!(
            score.maximum_statistics[&HitResult::LegacyComboIncrease],
            8
        );
    }

    #[test]
    fn test_no_padding_for_modern_scores() {
        let mut score = score(FIRST_LAZER_VERSION, &[(HitResult::Great, 10)]);

        populate_maximum_statistics(&mut score, &OsuRuleset, Some(20));
        assert_eq!(
            score.maximum_statistics,
            BTreeMap::from([(HitResult::Great, 10)])
        );
    }

    #[test]
    fn test_no_padding_without_shortfall() {
        let mut score = score(20_140_721, &[(HitResult::Great, 10)]);

        populate_maximum_statistics(&mut score, &OsuRuleset, Some(10));
        assert!(!score.maximum_statistics.contains_key(&HitResult::LegacyComboIncrease));
    }

    #[test]
    fn test_empty_legacy_score_stays_empty() {
        let mut score = score(20_140_721, &[]);

        populate_maximum_statistics(&mut score, &OsuRuleset, None);
        assert!(score.maximum_statistics.is_empty());
    }

    #[test]
    fn test_combo_from() {
        let statistics = BTreeMap::from([
            (HitResult::Great, 10),
            (HitResult::SmallTickHit, 5),
            (HitResult::LegacyComboIncrease, 3),
        ]);
        assert_eq!(combo_from(&statistics), 13);
    }
}
