use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Button state of a legacy replay record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReplayButtonState: u32 {
        const LEFT1 = 1;
        const RIGHT1 = 1 << 1;
        const LEFT2 = 1 << 2;
        const RIGHT2 = 1 << 3;
        const SMOKE = 1 << 4;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OsuActions: u8 {
        const LEFT_BUTTON = 1;
        const RIGHT_BUTTON = 1 << 1;
        const SMOKE = 1 << 2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TaikoActions: u8 {
        const LEFT_RIM = 1;
        const LEFT_CENTRE = 1 << 1;
        const RIGHT_CENTRE = 1 << 2;
        const RIGHT_RIM = 1 << 3;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CatchActions: u8 {
        const MOVE_LEFT = 1;
        const MOVE_RIGHT = 1 << 1;
        const DASH = 1 << 2;
    }
}

macro_rules! serde_as_bits {
    ($($flags:ty: $bits:ty),* $(,)?) => {$(
        impl Serialize for $flags {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.bits().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $flags {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = <$bits>::deserialize(deserializer)?;
                Ok(<$flags>::from_bits_truncate(bits))
            }
        }
    )*};
}

serde_as_bits!(
    ReplayButtonState: u32,
    OsuActions: u8,
    TaikoActions: u8,
    CatchActions: u8,
);

/// One record of the legacy text timeline, with an absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegacyReplayFrame {
    pub time: f64,
    pub mouse_x: Option<f32>,
    pub mouse_y: Option<f32>,
    pub buttons: ReplayButtonState,
}

impl LegacyReplayFrame {
    pub fn new(
        time: f64,
        mouse_x: Option<f32>,
        mouse_y: Option<f32>,
        buttons: ReplayButtonState,
    ) -> Self {
        Self {
            time,
            mouse_x,
            mouse_y,
            buttons,
        }
    }

    pub fn mouse_left(&self) -> bool {
        self.buttons
            .intersects(ReplayButtonState::LEFT1 | ReplayButtonState::LEFT2)
    }

    pub fn mouse_right(&self) -> bool {
        self.buttons
            .intersects(ReplayButtonState::RIGHT1 | ReplayButtonState::RIGHT2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Ruleset-specific input state of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ruleset", rename_all = "snake_case")]
pub enum FrameInput {
    Osu {
        position: Position,
        actions: OsuActions,
    },
    Taiko {
        actions: TaikoActions,
    },
    Catch {
        position: f32,
        dashing: bool,
        actions: CatchActions,
    },
    /// Bit `n` of `columns` is set while column `n` is held.
    Mania { columns: u32 },
}

impl FrameInput {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Osu { .. } => "osu",
            Self::Taiko { .. } => "taiko",
            Self::Catch { .. } => "catch",
            Self::Mania { .. } => "mania",
        }
    }
}

/// A timestamped input sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub time: f64,
    pub input: FrameInput,
}

impl Frame {
    pub fn new(time: f64, input: FrameInput) -> Self {
        Self { time, input }
    }
}

/// An ordered frame timeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Replay {
    pub frames: Vec<Frame>,
}

impl Replay {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Time of the last frame, or 0 for an empty replay.
    pub fn duration(&self) -> f64 {
        self.frames.last().map_or(0.0, |f| f.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_buttons() {
        let frame = LegacyReplayFrame::new(0.0, None, None, ReplayButtonState::LEFT2);
        assert!(frame.mouse_left());
        assert!(!frame.mouse_right());

        let frame = LegacyReplayFrame::new(
            0.0,
            None,
            None,
            ReplayButtonState::RIGHT1 | ReplayButtonState::SMOKE,
        );
        assert!(!frame.mouse_left());
        assert!(frame.mouse_right());
    }

    #[test]
    fn test_frame_input_json_is_tagged() {
        let input = FrameInput::Mania { columns: 0b101 };
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json, serde_json::json!({ "ruleset": "mania", "columns": 5 }));
    }

    #[test]
    fn test_actions_serialize_as_bits() {
        let input = FrameInput::Osu {
            position: Position::new(1.0, 2.0),
            actions: OsuActions::LEFT_BUTTON | OsuActions::SMOKE,
        };
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["actions"], serde_json::json!(5));
    }
}
