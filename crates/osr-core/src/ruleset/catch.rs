use super::{HitResult, LegacyMods, ModMapping, Ruleset, CLASSIC_ACRONYM, unconvertible};
use crate::beatmap::Beatmap;
use crate::error::Result;
use crate::replay::{CatchActions, Frame, FrameInput, LegacyReplayFrame, ReplayButtonState};

const MODS: &[ModMapping] = &[
    ModMapping::new("NC", LegacyMods::NIGHTCORE, 1.06).implying(LegacyMods::DOUBLE_TIME),
    ModMapping::new("DT", LegacyMods::DOUBLE_TIME, 1.06),
    ModMapping::new("PF", LegacyMods::PERFECT, 1.0).implying(LegacyMods::SUDDEN_DEATH),
    ModMapping::new("SD", LegacyMods::SUDDEN_DEATH, 1.0),
    ModMapping::new("CN", LegacyMods::CINEMA, 1.0).implying(LegacyMods::AUTOPLAY),
    ModMapping::new("AT", LegacyMods::AUTOPLAY, 1.0),
    ModMapping::new("EZ", LegacyMods::EASY, 0.5),
    ModMapping::new("FL", LegacyMods::FLASHLIGHT, 1.12),
    ModMapping::new("HT", LegacyMods::HALF_TIME, 0.3),
    ModMapping::new("HR", LegacyMods::HARD_ROCK, 1.12),
    ModMapping::new("HD", LegacyMods::HIDDEN, 1.06),
    ModMapping::new("NF", LegacyMods::NO_FAIL, 0.5),
    ModMapping::new("SV2", LegacyMods::SCORE_V2, 1.0),
    ModMapping::new("RX", LegacyMods::RELAX, 0.1),
    ModMapping::modern(CLASSIC_ACRONYM, 0.96),
];

const HIT_RESULTS: &[HitResult] = &[
    HitResult::Great,
    HitResult::Miss,
    HitResult::LargeTickHit,
    HitResult::LargeTickMiss,
    HitResult::SmallTickHit,
    HitResult::SmallTickMiss,
    HitResult::LargeBonus,
    HitResult::IgnoreMiss,
];

/// Ruleset 2: a catcher moving along the x axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatchRuleset;

impl Ruleset for CatchRuleset {
    fn id(&self) -> u8 {
        2
    }

    fn short_name(&self) -> &'static str {
        "catch"
    }

    fn mod_table(&self) -> &'static [ModMapping] {
        MODS
    }

    fn hit_results(&self) -> &'static [HitResult] {
        HIT_RESULTS
    }

    /// Movement direction is only known once the next position is, so the
    /// previous frame gets its move action here.
    fn frame_from_legacy(
        &self,
        legacy: &LegacyReplayFrame,
        _beatmap: Option<&Beatmap>,
        previous: Option<&mut Frame>,
    ) -> Result<FrameInput> {
        let position = legacy.mouse_x.unwrap_or_default();
        let dashing = legacy.buttons == ReplayButtonState::LEFT1;

        let mut actions = CatchActions::empty();
        actions.set(CatchActions::DASH, dashing);

        if let Some(Frame {
            input:
                FrameInput::Catch {
                    position: last_position,
                    actions: last_actions,
                    ..
                },
            ..
        }) = previous
        {
            if position > *last_position {
                last_actions.insert(CatchActions::MOVE_RIGHT);
            } else if position < *last_position {
                last_actions.insert(CatchActions::MOVE_LEFT);
            }
        }

        Ok(FrameInput::Catch {
            position,
            dashing,
            actions,
        })
    }

    fn frame_to_legacy(&self, frame: &Frame) -> Result<LegacyReplayFrame> {
        let FrameInput::Catch {
            position, dashing, ..
        } = &frame.input
        else {
            return Err(unconvertible(self, frame));
        };

        let buttons = if *dashing {
            ReplayButtonState::LEFT1
        } else {
            ReplayButtonState::empty()
        };

        Ok(LegacyReplayFrame::new(frame.time, Some(*position), None, buttons))
    }
}
