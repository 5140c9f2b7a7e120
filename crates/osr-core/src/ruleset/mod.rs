//! Ruleset capabilities consumed by the codec.
//!
//! - `Ruleset` - per-ruleset capability trait (mods, frames, judgements)
//! - `RulesetRegistry` - id → ruleset resolution
//! - `HitResult` - judgement kinds
//! - `Mod`, `LegacyMods` - modern mods and the legacy bitmask
//!
//! The four legacy rulesets ship as `OsuRuleset`, `TaikoRuleset`,
//! `CatchRuleset` and `ManiaRuleset`.

mod catch;
mod hit_result;
mod mania;
mod mods;
mod osu;
mod taiko;

pub use catch::CatchRuleset;
pub use hit_result::HitResult;
pub use mania::ManiaRuleset;
pub use mods::*;
pub use osu::OsuRuleset;
pub use taiko::TaikoRuleset;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::beatmap::Beatmap;
use crate::error::{Error, Result};
use crate::replay::{Frame, FrameInput, LegacyReplayFrame};

/// Capabilities a ruleset supplies to the codec.
pub trait Ruleset: Send + Sync {
    /// Wire id of the ruleset.
    fn id(&self) -> u8;

    fn short_name(&self) -> &'static str;

    /// Mod table, superseding mods first.
    fn mod_table(&self) -> &'static [ModMapping];

    /// Every judgement this ruleset can produce.
    fn hit_results(&self) -> &'static [HitResult];

    /// Whether legacy frames can only be converted with a beatmap at hand.
    fn requires_beatmap_for_frames(&self) -> bool {
        false
    }

    /// Converts a legacy record into this ruleset's frame input.
    ///
    /// `previous` is the last frame emitted so far; stateful formats may
    /// update it.
    fn frame_from_legacy(
        &self,
        legacy: &LegacyReplayFrame,
        beatmap: Option<&Beatmap>,
        previous: Option<&mut Frame>,
    ) -> Result<FrameInput>;

    /// Converts a frame back into a legacy record.
    fn frame_to_legacy(&self, frame: &Frame) -> Result<LegacyReplayFrame>;

    fn mods_from_legacy(&self, bits: LegacyMods) -> Vec<Mod> {
        mods_from_legacy(self.mod_table(), bits)
    }

    fn mods_to_legacy(&self, mods: &[Mod]) -> LegacyMods {
        mods_to_legacy(self.mod_table(), mods)
    }

    fn score_multiplier(&self, mods: &[Mod]) -> f64 {
        score_multiplier(self.mod_table(), mods)
    }

    /// The basic judgement with the highest base score.
    fn max_basic_result(&self) -> HitResult {
        self.hit_results()
            .iter()
            .copied()
            .filter(HitResult::is_basic)
            .max_by_key(HitResult::base_score)
            .unwrap_or(HitResult::Great)
    }

    /// Total score with the mod multipliers divided back out.
    fn total_score_without_mods(&self, total_score: i64, mods: &[Mod]) -> i64 {
        let multiplier = self.score_multiplier(mods);
        if multiplier <= 0.0 {
            return total_score;
        }
        (total_score as f64 / multiplier).round() as i64
    }
}

/// Error for a frame whose input belongs to another ruleset.
pub(crate) fn unconvertible(ruleset: &dyn Ruleset, frame: &Frame) -> Error {
    Error::UnconvertibleFrame {
        ruleset: ruleset.short_name(),
        frame_kind: frame.input.kind(),
    }
}

/// Maps ruleset ids to rulesets.
#[derive(Clone, Default)]
pub struct RulesetRegistry {
    rulesets: BTreeMap<u8, Arc<dyn Ruleset>>,
}

impl RulesetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the four legacy rulesets.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OsuRuleset));
        registry.register(Arc::new(TaikoRuleset));
        registry.register(Arc::new(CatchRuleset));
        registry.register(Arc::new(ManiaRuleset));
        registry
    }

    /// Adds a ruleset, replacing any ruleset with the same id.
    pub fn register(&mut self, ruleset: Arc<dyn Ruleset>) {
        self.rulesets.insert(ruleset.id(), ruleset);
    }

    pub fn get(&self, id: u8) -> Result<Arc<dyn Ruleset>> {
        self.rulesets
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownRuleset(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.rulesets.keys().copied()
    }
}

impl std::fmt::Debug for RulesetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.rulesets.iter().map(|(id, r)| (id, r.short_name())))
            .finish()
    }
}
