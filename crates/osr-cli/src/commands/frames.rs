//! Frames command: dump replay frames as TSV.

use std::path::Path;

use anyhow::{Context, Result, bail};
use osr_core::ScoreDecoder;
use osr_core::export::{format_frame_tsv_header, format_frame_tsv_row};
use tracing::warn;

pub fn run(decoder: &ScoreDecoder, file: &Path, limit: Option<usize>) -> Result<()> {
    let decoded = decoder
        .decode_file(file)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    for issue in &decoded.issues {
        warn!("{}", issue);
    }

    let Some(replay) = decoded.score.replay.as_ref() else {
        bail!("{} has no replay data", file.display());
    };

    println!("{}", format_frame_tsv_header());
    for frame in replay.frames.iter().take(limit.unwrap_or(usize::MAX)) {
        println!("{}", format_frame_tsv_row(frame));
    }

    Ok(())
}
