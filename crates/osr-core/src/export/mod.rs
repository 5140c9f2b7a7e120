//! Text formats for decoded scores and replays.

mod console;

pub use console::{format_score_console, format_score_summary};

use crate::replay::{Frame, FrameInput};
use crate::ruleset::Mod;

/// Comma-joined mod acronyms, empty for no mods.
pub fn format_mods(mods: &[Mod]) -> String {
    mods.iter()
        .map(|m| m.acronym.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_frame_tsv_header() -> String {
    ["time", "ruleset", "x", "y", "actions"].join("\t")
}

/// One TSV row per frame. Columns a ruleset has no value for are `-`.
pub fn format_frame_tsv_row(frame: &Frame) -> String {
    let (x, y, actions) = match &frame.input {
        FrameInput::Osu { position, actions } => (
            position.x.to_string(),
            position.y.to_string(),
            format!("{:?}", actions),
        ),
        FrameInput::Taiko { actions } => ("-".to_string(), "-".to_string(), format!("{:?}", actions)),
        FrameInput::Catch {
            position, actions, ..
        } => (position.to_string(), "-".to_string(), format!("{:?}", actions)),
        FrameInput::Mania { columns } => (
            "-".to_string(),
            "-".to_string(),
            format!("{:b}", columns),
        ),
    };

    [
        frame.time.to_string(),
        frame.input.kind().to_string(),
        x,
        y,
        actions,
    ]
    .join("\t")
}
