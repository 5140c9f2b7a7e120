//! Reencode command: decode a replay file and export it again.

use std::path::Path;

use anyhow::{Context, Result};
use osr_core::export::format_score_summary;
use osr_core::{EncodeOptions, RulesetRegistry, ScoreDecoder, ScoreEncoder};
use tracing::warn;

pub fn run(decoder: &ScoreDecoder, input: &Path, output: &Path, edited: bool) -> Result<()> {
    let decoded = decoder
        .decode_file(input)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    for issue in &decoded.issues {
        warn!("{}", issue);
    }

    let mut encoder = ScoreEncoder::new(RulesetRegistry::builtin())
        .with_options(EncodeOptions { mark_edited: edited });
    if let Some(beatmap) = decoded.beatmap {
        encoder = encoder.with_beatmap(beatmap);
    }

    encoder
        .encode_to_file(&decoded.score, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!("{}", format_score_summary(&decoded.score));
    eprintln!("Wrote {}", output.display());
    Ok(())
}
