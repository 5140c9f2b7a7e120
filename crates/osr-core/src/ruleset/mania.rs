use super::{HitResult, LegacyMods, ModMapping, Ruleset, CLASSIC_ACRONYM, unconvertible};
use crate::beatmap::Beatmap;
use crate::error::{Error, Result};
use crate::replay::{Frame, FrameInput, LegacyReplayFrame, ReplayButtonState};

const MODS: &[ModMapping] = &[
    ModMapping::new("NC", LegacyMods::NIGHTCORE, 1.0).implying(LegacyMods::DOUBLE_TIME),
    ModMapping::new("DT", LegacyMods::DOUBLE_TIME, 1.0),
    ModMapping::new("PF", LegacyMods::PERFECT, 1.0).implying(LegacyMods::SUDDEN_DEATH),
    ModMapping::new("SD", LegacyMods::SUDDEN_DEATH, 1.0),
    ModMapping::new("CN", LegacyMods::CINEMA, 1.0).implying(LegacyMods::AUTOPLAY),
    ModMapping::new("AT", LegacyMods::AUTOPLAY, 1.0),
    ModMapping::new("EZ", LegacyMods::EASY, 0.5),
    ModMapping::new("FL", LegacyMods::FLASHLIGHT, 1.0),
    ModMapping::new("HT", LegacyMods::HALF_TIME, 0.5),
    ModMapping::new("HR", LegacyMods::HARD_ROCK, 1.0),
    ModMapping::new("HD", LegacyMods::HIDDEN, 1.0),
    ModMapping::new("NF", LegacyMods::NO_FAIL, 0.5),
    ModMapping::new("SV2", LegacyMods::SCORE_V2, 1.0),
    ModMapping::new("FI", LegacyMods::FADE_IN, 1.0),
    ModMapping::new("RD", LegacyMods::RANDOM, 1.0),
    ModMapping::new("MR", LegacyMods::MIRROR, 1.0),
    ModMapping::new("1K", LegacyMods::KEY1, 0.9),
    ModMapping::new("2K", LegacyMods::KEY2, 0.9),
    ModMapping::new("3K", LegacyMods::KEY3, 0.9),
    ModMapping::new("4K", LegacyMods::KEY4, 0.9),
    ModMapping::new("5K", LegacyMods::KEY5, 0.9),
    ModMapping::new("6K", LegacyMods::KEY6, 0.9),
    ModMapping::new("7K", LegacyMods::KEY7, 0.9),
    ModMapping::new("8K", LegacyMods::KEY8, 0.9),
    ModMapping::new("9K", LegacyMods::KEY9, 0.9),
    ModMapping::new("DS", LegacyMods::KEY_COOP, 1.0),
    ModMapping::modern(CLASSIC_ACRONYM, 0.96),
];

const HIT_RESULTS: &[HitResult] = &[
    HitResult::Perfect,
    HitResult::Great,
    HitResult::Good,
    HitResult::Ok,
    HitResult::Meh,
    HitResult::Miss,
    HitResult::IgnoreHit,
    HitResult::IgnoreMiss,
    HitResult::ComboBreak,
];

/// Ruleset 3: vertical scrolling keys.
///
/// Legacy records store the held columns as a bitmask in the x coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManiaRuleset;

impl ManiaRuleset {
    fn column_mask(beatmap: &Beatmap) -> u32 {
        match beatmap.total_columns {
            Some(columns) if columns < u32::BITS => (1u32 << columns) - 1,
            _ => u32::MAX,
        }
    }
}

impl Ruleset for ManiaRuleset {
    fn id(&self) -> u8 {
        3
    }

    fn short_name(&self) -> &'static str {
        "mania"
    }

    fn mod_table(&self) -> &'static [ModMapping] {
        MODS
    }

    fn hit_results(&self) -> &'static [HitResult] {
        HIT_RESULTS
    }

    fn requires_beatmap_for_frames(&self) -> bool {
        true
    }

    fn frame_from_legacy(
        &self,
        legacy: &LegacyReplayFrame,
        beatmap: Option<&Beatmap>,
        _previous: Option<&mut Frame>,
    ) -> Result<FrameInput> {
        let beatmap = beatmap.ok_or(Error::BeatmapRequiredForConversion {
            ruleset: self.short_name(),
        })?;

        let raw = legacy.mouse_x.unwrap_or_default().max(0.0) as u32;
        Ok(FrameInput::Mania {
            columns: raw & Self::column_mask(beatmap),
        })
    }

    fn frame_to_legacy(&self, frame: &Frame) -> Result<LegacyReplayFrame> {
        let FrameInput::Mania { columns } = &frame.input else {
            return Err(unconvertible(self, frame));
        };

        Ok(LegacyReplayFrame::new(
            frame.time,
            Some(*columns as f32),
            None,
            ReplayButtonState::empty(),
        ))
    }
}
