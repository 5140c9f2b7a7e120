//! CLI command implementations.

pub mod frames;
pub mod info;
pub mod overlay;
pub mod reencode;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use osr_core::{Beatmap, BeatmapStore, DecodeOptions, RulesetRegistry, ScoreDecoder};
use tracing::info;

/// Decoder shared by every command, optionally backed by a beatmap index.
pub fn build_decoder(beatmaps: Option<&Path>, strict: bool) -> Result<ScoreDecoder> {
    let options = DecodeOptions { strict };
    let mut decoder = ScoreDecoder::new(RulesetRegistry::builtin()).with_options(options);

    if let Some(path) = beatmaps {
        let store = load_beatmap_store(path)?;
        info!("Loaded {} beatmaps from {}", store.len(), path.display());
        decoder = decoder.with_beatmap_lookup(Arc::new(store));
    }

    Ok(decoder)
}

/// Short name of a built-in ruleset, `?` for unknown ids.
pub fn ruleset_name(id: u8) -> &'static str {
    RulesetRegistry::builtin()
        .get(id)
        .map_or("?", |ruleset| ruleset.short_name())
}

fn load_beatmap_store(path: &Path) -> Result<BeatmapStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read beatmap index {}", path.display()))?;
    let beatmaps: Vec<Beatmap> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid beatmap index {}", path.display()))?;
    Ok(beatmaps.into_iter().collect())
}
