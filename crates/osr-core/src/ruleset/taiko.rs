use super::{HitResult, LegacyMods, ModMapping, Ruleset, CLASSIC_ACRONYM, unconvertible};
use crate::beatmap::Beatmap;
use crate::error::Result;
use crate::replay::{Frame, FrameInput, LegacyReplayFrame, ReplayButtonState, TaikoActions};

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
    ModMapping::new("RX", LegacyMods::RELAX, 0.1),
    ModMapping::new("RD", LegacyMods::RANDOM, 1.0),
    ModMapping::modern(CLASSIC_ACRONYM, 0.96),
];

const HIT_RESULTS: &[HitResult] = &[
    HitResult::Great,
    HitResult::Ok,
    HitResult::Miss,
    HitResult::SmallTickHit,
    HitResult::SmallBonus,
    HitResult::LargeBonus,
    HitResult::IgnoreHit,
    HitResult::IgnoreMiss,
];

/// Button bits of the legacy record and the drum action each one means.
const DRUM_BUTTONS: [(ReplayButtonState, TaikoActions); 4] = [
    (ReplayButtonState::RIGHT1, TaikoActions::LEFT_RIM),
    (ReplayButtonState::RIGHT2, TaikoActions::RIGHT_RIM),
    (ReplayButtonState::LEFT1, TaikoActions::LEFT_CENTRE),
    (ReplayButtonState::LEFT2, TaikoActions::RIGHT_CENTRE),
];

/// Ruleset 1: drum hits, no cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaikoRuleset;

impl Ruleset for TaikoRuleset {
    fn id(&self) -> u8 {
        1
    }

    fn short_name(&self) -> &'static str {
        "taiko"
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
        let actions = DRUM_BUTTONS
            .iter()
            .filter(|(button, _)| legacy.buttons.contains(*button))
            .fold(TaikoActions::empty(), |acc, (_, action)| acc | *action);

        Ok(FrameInput::Taiko { actions })
    }

    fn frame_to_legacy(&self, frame: &Frame) -> Result<LegacyReplayFrame> {
        let FrameInput::Taiko { actions } = &frame.input else {
            return Err(unconvertible(self, frame));
        };

        let buttons = DRUM_BUTTONS
            .iter()
            .filter(|(_, action)| actions.contains(*action))
            .fold(ReplayButtonState::empty(), |acc, (button, _)| acc | *button);

        Ok(LegacyReplayFrame::new(frame.time, None, None, buttons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drum_mapping() {
        let legacy = LegacyReplayFrame::new(
            0.0,
            Some(0.0),
            Some(0.0),
            ReplayButtonState::RIGHT1 | ReplayButtonState::LEFT2,
        );
        let input = TaikoRuleset.frame_from_legacy(&legacy, None, None).unwrap();

        assert_eq!(
            input,
            FrameInput::Taiko {
                actions: TaikoActions::LEFT_RIM | TaikoActions::RIGHT_CENTRE,
            }
        );
    }

    #[test]
    fn test_drum_mapping_back() {
        let frame = Frame::new(
            10.0,
            FrameInput::Taiko {
                actions: TaikoActions::RIGHT_RIM | TaikoActions::LEFT_CENTRE,
            },
        );
        let legacy = TaikoRuleset.frame_to_legacy(&frame).unwrap();

        assert_eq!(
            legacy.buttons,
            ReplayButtonState::RIGHT2 | ReplayButtonState::LEFT1
        );
        assert_eq!(legacy.mouse_x, None);
    }

    #[test]
    fn test_random_is_taiko_specific() {
        let mods = TaikoRuleset.mods_from_legacy(LegacyMods::RANDOM);
        assert_eq!(mods.len(), 1);
        assert!(mods[0].is("RD"));
    }
}
