//! Overlay command: print the score-info overlay JSON for a replay.

use std::path::Path;

use anyhow::{Context, Result};
use osr_core::{ScoreDecoder, ScoreInfoOverlay};

pub fn run(decoder: &ScoreDecoder, file: &Path) -> Result<()> {
    let decoded = decoder
        .decode_file(file)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    let overlay = ScoreInfoOverlay::from_score(&decoded.score);
    println!("{}", serde_json::to_string_pretty(&overlay)?);
    Ok(())
}
