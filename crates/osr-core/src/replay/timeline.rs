//! The legacy text timeline: `delta|x|y|buttons` records joined by `,`.

use std::fmt::Write as _;

use tracing::debug;

use super::{Frame, LegacyReplayFrame, Replay, ReplayButtonState};
use crate::codec::DecodeContext;
use crate::config::replay::{
    MAX_COORDINATE_VALUE, MAX_PARSE_VALUE, PLACEHOLDER_POSITION, PLACEHOLDER_RECORDS,
    SENTINEL_DELTA, SENTINEL_RECORD,
};
use crate::error::{Error, Result};
use crate::ruleset::Ruleset;

const RECORD_SEPARATOR: char = ',';
const FIELD_SEPARATOR: char = '|';

/// Parses a decompressed timeline into frames.
///
/// The running time starts at the context's frame time offset and advances
/// by every parsed delta, including those of records that are dropped.
pub fn decode_timeline(text: &str, ctx: &DecodeContext<'_>) -> Result<Replay> {
    let mut frames: Vec<Frame> = Vec::new();
    let mut last_time = ctx.frame_time_offset;
    let mut dropped = 0usize;
    let missing_beatmap = ctx.ruleset.requires_beatmap_for_frames() && !ctx.has_beatmap();

    for (index, record) in text.split(RECORD_SEPARATOR).enumerate() {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        if fields.len() < 4 {
            continue;
        }

        if fields[0] == SENTINEL_DELTA {
            continue;
        }

        let delta = parse_float(fields[0], MAX_PARSE_VALUE, index, "delta")?;
        let x = parse_float(fields[1], MAX_COORDINATE_VALUE as f64, index, "x")? as f32;
        let y = parse_float(fields[2], MAX_COORDINATE_VALUE as f64, index, "y")? as f32;
        let buttons = parse_buttons(fields[3], index)?;

        last_time += delta;

        if index < PLACEHOLDER_RECORDS && (x, y) == PLACEHOLDER_POSITION {
            dropped += 1;
            continue;
        }

        // Negative deltas only occur in broken legacy replays.
        if delta < 0.0 {
            dropped += 1;
            continue;
        }

        if missing_beatmap {
            return Err(Error::BeatmapRequiredForConversion {
                ruleset: ctx.ruleset.short_name(),
            });
        }

        let legacy = LegacyReplayFrame::new(last_time, Some(x), Some(y), buttons);
        let input = ctx
            .ruleset
            .frame_from_legacy(&legacy, ctx.beatmap, frames.last_mut())?;
        frames.push(Frame::new(last_time, input));
    }

    debug!(
        "Decoded {} replay frames ({} records dropped)",
        frames.len(),
        dropped
    );
    Ok(Replay::new(frames))
}

/// Writes frames back into timeline text, terminated by the sentinel record.
///
/// `offset` is subtracted from every frame time before rounding, undoing the
/// offset applied at decode time.
pub fn encode_timeline(frames: &[Frame], ruleset: &dyn Ruleset, offset: f64) -> Result<String> {
    let mut text = String::new();
    let mut last_time = 0i64;

    for frame in frames {
        let legacy = ruleset.frame_to_legacy(frame)?;
        let time = (frame.time - offset).round_ties_even() as i64;

        let _ = write!(
            text,
            "{}{sep}{}{sep}{}{sep}{}{RECORD_SEPARATOR}",
            time - last_time,
            legacy.mouse_x.unwrap_or_default(),
            legacy.mouse_y.unwrap_or_default(),
            legacy.buttons.bits() as i32,
            sep = FIELD_SEPARATOR,
        );
        last_time = time;
    }

    text.push_str(SENTINEL_RECORD);
    Ok(text)
}

fn parse_float(field: &str, limit: f64, index: usize, name: &str) -> Result<f64> {
    let value: f64 = field.trim().parse().map_err(|_| Error::MalformedFrame {
        index,
        message: format!("{name} is not a number: {field:?}"),
    })?;

    if value.is_nan() || value.abs() > limit {
        return Err(Error::MalformedFrame {
            index,
            message: format!("{name} out of range: {field:?}"),
        });
    }
    Ok(value)
}

fn parse_buttons(field: &str, index: usize) -> Result<ReplayButtonState> {
    let value: i64 = field.trim().parse().map_err(|_| Error::MalformedFrame {
        index,
        message: format!("buttons is not an integer: {field:?}"),
    })?;

    let value = i32::try_from(value).map_err(|_| Error::MalformedFrame {
        index,
        message: format!("buttons out of range: {field:?}"),
    })?;
    Ok(ReplayButtonState::from_bits_retain(value as u32))
}
