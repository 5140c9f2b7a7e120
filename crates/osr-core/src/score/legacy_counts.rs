use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ruleset::HitResult;

/// The six judgement counters of the legacy container, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyCounts {
    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
}

/// Which judgement each counter slot holds for a ruleset.
struct SlotMapping {
    count_300: Option<HitResult>,
    count_100: Option<HitResult>,
    count_50: Option<HitResult>,
    count_geki: Option<HitResult>,
    count_katu: Option<HitResult>,
    count_miss: Option<HitResult>,
}

impl SlotMapping {
    fn for_ruleset(ruleset_id: u8) -> Self {
        match ruleset_id {
            0 => Self {
                count_300: Some(HitResult::Great),
                count_100: Some(HitResult::Ok),
                count_50: Some(HitResult::Meh),
                count_geki: None,
                count_katu: None,
                count_miss: Some(HitResult::Miss),
            },
            1 => Self {
                count_300: Some(HitResult::Great),
                count_100: Some(HitResult::Ok),
                count_50: None,
                count_geki: None,
                count_katu: None,
                count_miss: Some(HitResult::Miss),
            },
            2 => Self {
                count_300: Some(HitResult::Great),
                count_100: Some(HitResult::LargeTickHit),
                count_50: Some(HitResult::SmallTickHit),
                count_geki: None,
                count_katu: Some(HitResult::SmallTickMiss),
                count_miss: Some(HitResult::Miss),
            },
            3 => Self {
                count_300: Some(HitResult::Great),
                count_100: Some(HitResult::Ok),
                count_50: Some(HitResult::Meh),
                count_geki: Some(HitResult::Perfect),
                count_katu: Some(HitResult::Good),
                count_miss: Some(HitResult::Miss),
            },
            _ => Self {
                count_300: None,
                count_100: None,
                count_50: None,
                count_geki: None,
                count_katu: None,
                count_miss: None,
            },
        }
    }
}

impl LegacyCounts {
    /// Expands the counters into a statistics map. Zero counters are left out.
    pub fn to_statistics(&self, ruleset_id: u8) -> BTreeMap<HitResult, u32> {
        let slots = SlotMapping::for_ruleset(ruleset_id);
        let mut statistics = BTreeMap::new();

        for (result, count) in [
            (slots.count_300, self.count_300),
            (slots.count_100, self.count_100),
            (slots.count_50, self.count_50),
            (slots.count_geki, self.count_geki),
            (slots.count_katu, self.count_katu),
            (slots.count_miss, self.count_miss),
        ] {
            if let Some(result) = result {
                if count > 0 {
                    *statistics.entry(result).or_insert(0) += u32::from(count);
                }
            }
        }

        statistics
    }

    /// Folds a statistics map back into counters, saturating at `u16::MAX`.
    pub fn from_statistics(ruleset_id: u8, statistics: &BTreeMap<HitResult, u32>) -> Self {
        let slots = SlotMapping::for_ruleset(ruleset_id);
        let count = |result: Option<HitResult>| {
            result.map_or(0, |r| statistics.get(&r).copied().unwrap_or(0))
        };

        let mut count_miss = count(slots.count_miss);
        // Catch folds missed droplets into the miss counter.
        if ruleset_id == 2 {
            count_miss = count_miss.saturating_add(count(Some(HitResult::LargeTickMiss)));
        }

        Self {
            count_300: saturate(count(slots.count_300)),
            count_100: saturate(count(slots.count_100)),
            count_50: saturate(count(slots.count_50)),
            count_geki: saturate(count(slots.count_geki)),
            count_katu: saturate(count(slots.count_katu)),
            count_miss: saturate(count_miss),
        }
    }

    pub fn total(&self) -> u32 {
        [
            self.count_300,
            self.count_100,
            self.count_50,
            self.count_geki,
            self.count_katu,
            self.count_miss,
        ]
        .iter()
        .map(|&c| u32::from(c))
        .sum()
    }
}

fn saturate(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
