//! Beatmap-side collaborators of the codec.
//!
//! Beatmap loading and difficulty calculation live outside this crate. The
//! codec only needs:
//! - `BeatmapLookup` - resolve a playable beatmap from its hash
//! - `DifficultyCalculator` - compute attributes of a beatmap under mods
//!
//! `BeatmapStore` is a ready-made in-memory lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::replay::{EARLY_TIMING_BEATMAP_VERSION, EARLY_VERSION_TIMING_OFFSET};
use crate::error::Result;
use crate::ruleset::{Mod, Ruleset};

/// The parts of a playable beatmap the codec reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Beatmap {
    pub md5_hash: String,
    /// `osu file format vN` version of the beatmap file.
    pub format_version: i32,
    pub hit_object_count: usize,
    /// Key count of mania beatmaps.
    pub total_columns: Option<u32>,
}

impl Beatmap {
    pub fn is_empty(&self) -> bool {
        self.hit_object_count == 0
    }

    /// Offset added to replay frame times of scores set on this beatmap.
    pub fn legacy_frame_time_offset(&self) -> f64 {
        if self.format_version < EARLY_TIMING_BEATMAP_VERSION {
            EARLY_VERSION_TIMING_OFFSET
        } else {
            0.0
        }
    }
}

/// Resolves beatmaps by their MD5 hash.
pub trait BeatmapLookup: Send + Sync {
    /// Returns `Ok(None)` when no beatmap has this hash.
    fn find_by_hash(&self, hash: &str) -> Result<Option<Beatmap>>;
}

/// In-memory `BeatmapLookup` keyed by hash.
#[derive(Debug, Clone, Default)]
pub struct BeatmapStore {
    beatmaps: HashMap<String, Beatmap>,
}

impl BeatmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, beatmap: Beatmap) {
        self.beatmaps.insert(beatmap.md5_hash.clone(), beatmap);
    }

    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }
}

impl FromIterator<Beatmap> for BeatmapStore {
    fn from_iter<I: IntoIterator<Item = Beatmap>>(iter: I) -> Self {
        let mut store = Self::new();
        for beatmap in iter {
            store.insert(beatmap);
        }
        store
    }
}

impl BeatmapLookup for BeatmapStore {
    fn find_by_hash(&self, hash: &str) -> Result<Option<Beatmap>> {
        Ok(self.beatmaps.get(hash).cloned())
    }
}

/// Output of a difficulty calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DifficultyAttributes {
    pub star_rating: f64,
    pub max_combo: u32,
}

/// Difficulty calculation for a ruleset.
///
/// Implementations own whatever object model they calculate on; the codec
/// only consumes the resulting attributes.
pub trait DifficultyCalculator: Send + Sync {
    fn calculate(
        &self,
        ruleset: &dyn Ruleset,
        beatmap: &Beatmap,
        mods: &[Mod],
    ) -> Result<DifficultyAttributes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beatmap(hash: &str, format_version: i32) -> Beatmap {
        Beatmap {
            md5_hash: hash.to_string(),
            format_version,
            hit_object_count: 10,
            total_columns: None,
        }
    }

    #[test]
    fn test_early_version_offset() {
        assert_eq!(beatmap("a", 4).legacy_frame_time_offset(), 24.0);
        assert_eq!(beatmap("a", 5).legacy_frame_time_offset(), 0.0);
        assert_eq!(beatmap("a", 14).legacy_frame_time_offset(), 0.0);
    }

    #[test]
    fn test_store_lookup() {
        let store: BeatmapStore = [beatmap("abc", 14), beatmap("def", 3)]
            .into_iter()
            .collect();

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.find_by_hash("def").unwrap().map(|b| b.format_version),
            Some(3)
        );
        assert!(store.find_by_hash("zzz").unwrap().is_none());
    }
}
