use super::{HitResult, LegacyMods, ModMapping, Ruleset, CLASSIC_ACRONYM, unconvertible};
use crate::beatmap::Beatmap;
use crate::error::Result;
use crate::replay::{Frame, FrameInput, LegacyReplayFrame, OsuActions, Position, ReplayButtonState};

const MODS: &[ModMapping] = &[
    ModMapping::new("NC", LegacyMods::NIGHTCORE, 1.12).implying(LegacyMods::DOUBLE_TIME),
    ModMapping::new("DT", LegacyMods::DOUBLE_TIME, 1.12),
    ModMapping::new("PF", LegacyMods::PERFECT, 1.0).implying(LegacyMods::SUDDEN_DEATH),
    ModMapping::new("SD", LegacyMods::SUDDEN_DEATH, 1.0),
    ModMapping::new("CN", LegacyMods::CINEMA, 1.0).implying(LegacyMods::AUTOPLAY),
    ModMapping::new("AT", LegacyMods::AUTOPLAY, 1.0),
    ModMapping::new("EZ", LegacyMods::EASY, 0.5),
    ModMapping::new("FL", LegacyMods::FLASHLIGHT, 1.12),
    ModMapping::new("HT", LegacyMods::HALF_TIME, 0.3),
    ModMapping::new("HR", LegacyMods::HARD_ROCK, 1.06),
    ModMapping::new("HD", LegacyMods::HIDDEN, 1.06),
    ModMapping::new("NF", LegacyMods::NO_FAIL, 0.5),
    ModMapping::new("SV2", LegacyMods::SCORE_V2, 1.0),
    ModMapping::new("AP", LegacyMods::AUTOPILOT, 0.1),
    ModMapping::new("RX", LegacyMods::RELAX, 0.1),
    ModMapping::new("SO", LegacyMods::SPUN_OUT, 0.9),
    ModMapping::new("TD", LegacyMods::TOUCH_DEVICE, 1.0),
    ModMapping::new("TP", LegacyMods::TARGET, 1.0),
    ModMapping::modern(CLASSIC_ACRONYM, 0.96),
];

const HIT_RESULTS: &[HitResult] = &[
    HitResult::Great,
    HitResult::Ok,
    HitResult::Meh,
    HitResult::Miss,
    HitResult::LargeTickHit,
    HitResult::LargeTickMiss,
    HitResult::SmallTickHit,
    HitResult::SmallTickMiss,
    HitResult::SliderTailHit,
    HitResult::SmallBonus,
    HitResult::LargeBonus,
    HitResult::IgnoreHit,
    HitResult::IgnoreMiss,
    HitResult::ComboBreak,
];

/// Ruleset 0: circles, sliders and spinners under a cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsuRuleset;

impl Ruleset for OsuRuleset {
    fn id(&self) -> u8 {
        0
    }

    fn short_name(&self) -> &'static str {
        "osu"
    }

    fn mod_table(&self) -> &'static [ModMapping] {
        MODS
    }

    fn hit_results(&self) -> &'static [HitResult] {
        HIT_RESULTS
    }

    fn frame_from_legacy(
        &self,
        legacy: &LegacyReplayFrame,
        _beatmap: Option<&Beatmap>,
        _previous: Option<&mut Frame>,
    ) -> Result<FrameInput> {
        let mut actions = OsuActions::empty();
        actions.set(OsuActions::LEFT_BUTTON, legacy.mouse_left());
        actions.set(OsuActions::RIGHT_BUTTON, legacy.mouse_right());
        actions.set(
            OsuActions::SMOKE,
            legacy.buttons.contains(ReplayButtonState::SMOKE),
        );

        Ok(FrameInput::Osu {
            position: Position::new(
                legacy.mouse_x.unwrap_or_default(),
                legacy.mouse_y.unwrap_or_default(),
            ),
            actions,
        })
    }

    fn frame_to_legacy(&self, frame: &Frame) -> Result<LegacyReplayFrame> {
        let FrameInput::Osu { position, actions } = &frame.input else {
            return Err(unconvertible(self, frame));
        };

        let mut buttons = ReplayButtonState::empty();
        buttons.set(
            ReplayButtonState::LEFT1,
            actions.contains(OsuActions::LEFT_BUTTON),
        );
        buttons.set(
            ReplayButtonState::RIGHT1,
            actions.contains(OsuActions::RIGHT_BUTTON),
        );
        buttons.set(ReplayButtonState::SMOKE, actions.contains(OsuActions::SMOKE));

        Ok(LegacyReplayFrame::new(
            frame.time,
            Some(position.x),
            Some(position.y),
            buttons,
        ))
    }
}
