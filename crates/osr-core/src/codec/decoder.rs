use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::layout::{trailing_fields, TrailingField};
use super::DecodeContext;
use crate::beatmap::{Beatmap, BeatmapLookup, DifficultyCalculator};
use crate::compression;
use crate::config::version::{is_legacy_version, total_score_version_for};
use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::replay::{decode_timeline, Replay};
use crate::ruleset::{LegacyMods, Mod, RulesetRegistry};
use crate::score::statistics::populate_maximum_statistics;
use crate::score::{LegacyCounts, Score, ScoreInfoOverlay};
use crate::wire::ByteBuffer;

/// A problem the decoder worked around instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum DecodeIssue {
    /// The beatmap lookup failed; the score was decoded without a beatmap.
    BeatmapLookupFailed(String),
    /// The replay could not be decoded and was left out.
    ReplayDropped(String),
    /// The score-info overlay could not be decoded and was not applied.
    OverlayDropped(String),
    /// Difficulty attributes were unavailable; legacy combo padding skipped.
    DifficultyUnavailable(String),
}

impl std::fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeatmapLookupFailed(msg) => write!(f, "beatmap lookup failed: {}", msg),
            Self::ReplayDropped(msg) => write!(f, "replay dropped: {}", msg),
            Self::OverlayDropped(msg) => write!(f, "overlay dropped: {}", msg),
            Self::DifficultyUnavailable(msg) => write!(f, "difficulty unavailable: {}", msg),
        }
    }
}

/// Result of a decode.
#[derive(Debug, Clone)]
pub struct DecodedScore {
    pub score: Score,
    /// Beatmap the score was resolved against, if any.
    pub beatmap: Option<Beatmap>,
    pub issues: Vec<DecodeIssue>,
}

impl DecodedScore {
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reads scores out of the legacy container.
#[derive(Clone)]
pub struct ScoreDecoder {
    registry: RulesetRegistry,
    beatmaps: Option<Arc<dyn BeatmapLookup>>,
    difficulty: Option<Arc<dyn DifficultyCalculator>>,
    options: DecodeOptions,
}

impl ScoreDecoder {
    pub fn new(registry: RulesetRegistry) -> Self {
        Self {
            registry,
            beatmaps: None,
            difficulty: None,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_beatmap_lookup(mut self, lookup: Arc<dyn BeatmapLookup>) -> Self {
        self.beatmaps = Some(lookup);
        self
    }

    pub fn with_difficulty_calculator(mut self, calculator: Arc<dyn DifficultyCalculator>) -> Self {
        self.difficulty = Some(calculator);
        self
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<DecodedScore> {
        let bytes = std::fs::read(path.as_ref())?;
        info!("Decoding {:?} ({} bytes)", path.as_ref(), bytes.len());
        self.decode(&bytes)
    }

    pub fn decode(&self, data: &[u8]) -> Result<DecodedScore> {
        let mut buf = ByteBuffer::new(data);
        let mut issues = Vec::new();

        let ruleset_id = buf.read_u8()?;
        let ruleset = self.registry.get(ruleset_id)?;

        let format_version = buf.read_i32()?;
        let beatmap_hash = buf.read_string_or_empty()?;
        let beatmap = self.find_beatmap(&beatmap_hash, &mut issues);
        let ctx = DecodeContext::new(ruleset.as_ref(), beatmap.as_ref());
        debug!("Decoding score with {:?}, version {}", ctx, format_version);

        let username = buf.read_string_or_empty()?;
        let replay_hash = buf.read_string_or_empty()?;

        let counts = LegacyCounts {
            count_300: buf.read_u16()?,
            count_100: buf.read_u16()?,
            count_50: buf.read_u16()?,
            count_geki: buf.read_u16()?,
            count_katu: buf.read_u16()?,
            count_miss: buf.read_u16()?,
        };

        let total_score = buf.read_i32()?;
        let max_combo = buf.read_u16()?;
        // Recomputed from the statistics instead.
        let _perfect = buf.read_bool()?;

        let mut mods = ruleset.mods_from_legacy(LegacyMods::from_wire(buf.read_i32()?));
        if is_legacy_version(format_version) {
            mods.push(Mod::classic());
        }

        let _hp_graph = buf.read_string()?;
        let date = buf.read_datetime()?;
        let replay_blob = buf.read_byte_array()?;

        let mut legacy_online_id = None;
        let mut overlay_blob = None;
        for field in trailing_fields(format_version) {
            match field {
                TrailingField::LegacyOnlineIdI32 => {
                    legacy_online_id = online_id(i64::from(buf.read_i32()?));
                }
                TrailingField::LegacyOnlineIdI64 => {
                    legacy_online_id = online_id(buf.read_i64()?);
                }
                TrailingField::ScoreInfoOverlay => {
                    overlay_blob = buf.read_byte_array()?;
                }
            }
        }

        let mut score = Score {
            ruleset_id,
            format_version,
            total_score_version: total_score_version_for(format_version),
            beatmap_hash,
            replay_hash,
            legacy_online_id,
            username,
            total_score: i64::from(total_score),
            max_combo: u32::from(max_combo),
            mods,
            date,
            statistics: counts.to_statistics(ruleset_id),
            ..Score::default()
        };

        if let Some(blob) = replay_blob.filter(|b| !b.is_empty()) {
            match decode_replay(blob, &ctx) {
                Ok(replay) => score.replay = Some(replay),
                Err(e) => self.degrade(e, &mut issues, DecodeIssue::ReplayDropped)?,
            }
        }

        if let Some(blob) = overlay_blob.filter(|b| !b.is_empty()) {
            match decode_overlay(blob) {
                Ok(overlay) => overlay.merge_into(&mut score, ruleset.as_ref()),
                Err(e) => self.degrade(e, &mut issues, DecodeIssue::OverlayDropped)?,
            }
        }

        let difficulty_max_combo = if score.is_legacy() && score.maximum_statistics.is_empty() {
            self.difficulty_max_combo(&ctx, &score.mods, &mut issues)
        } else {
            None
        };
        populate_maximum_statistics(&mut score, ruleset.as_ref(), difficulty_max_combo);

        if score.is_legacy() {
            score.legacy_total_score = Some(score.total_score);
        }

        info!(
            "Decoded {} score by {:?} ({} frames, {} issues)",
            ruleset.short_name(),
            score.username,
            score.frame_count(),
            issues.len()
        );

        Ok(DecodedScore {
            score,
            beatmap,
            issues,
        })
    }

    fn find_beatmap(&self, hash: &str, issues: &mut Vec<DecodeIssue>) -> Option<Beatmap> {
        let lookup = self.beatmaps.as_ref()?;

        match lookup.find_by_hash(hash) {
            Ok(Some(beatmap)) if beatmap.is_empty() => {
                debug!("Beatmap {} has no hit objects, ignoring it", hash);
                None
            }
            Ok(Some(beatmap)) => Some(beatmap),
            Ok(None) => {
                debug!("No beatmap found for hash {}", hash);
                None
            }
            Err(e) => {
                warn!("Beatmap lookup for {} failed: {}", hash, e);
                issues.push(DecodeIssue::BeatmapLookupFailed(e.to_string()));
                None
            }
        }
    }

    fn difficulty_max_combo(
        &self,
        ctx: &DecodeContext<'_>,
        mods: &[Mod],
        issues: &mut Vec<DecodeIssue>,
    ) -> Option<u32> {
        let calculator = self.difficulty.as_ref()?;
        let beatmap = ctx.beatmap?;

        match calculator.calculate(ctx.ruleset, beatmap, mods) {
            Ok(attributes) => Some(attributes.max_combo),
            Err(e) => {
                warn!("Difficulty calculation failed: {}", e);
                issues.push(DecodeIssue::DifficultyUnavailable(e.to_string()));
                None
            }
        }
    }

    /// Records a tolerable error as an issue, or returns it in strict mode.
    fn degrade(
        &self,
        error: Error,
        issues: &mut Vec<DecodeIssue>,
        issue: fn(String) -> DecodeIssue,
    ) -> Result<()> {
        let tolerable = matches!(
            error,
            Error::CorruptPayload(_) | Error::BeatmapRequiredForConversion { .. }
        );
        if self.options.strict || !tolerable {
            return Err(error);
        }

        let issue = issue(error.to_string());
        warn!("{}", issue);
        issues.push(issue);
        Ok(())
    }
}

impl std::fmt::Debug for ScoreDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreDecoder")
            .field("registry", &self.registry)
            .field("beatmaps", &self.beatmaps.is_some())
            .field("difficulty", &self.difficulty.is_some())
            .field("options", &self.options)
            .finish()
    }
}

fn online_id(value: i64) -> Option<i64> {
    (value >= 0).then_some(value)
}

fn decode_replay(blob: &[u8], ctx: &DecodeContext<'_>) -> Result<Replay> {
    let raw = compression::decompress(blob)?;
    let text = String::from_utf8(raw)
        .map_err(|e| Error::CorruptPayload(format!("replay text is not UTF-8: {}", e)))?;
    decode_timeline(&text, ctx)
}

fn decode_overlay(blob: &[u8]) -> Result<ScoreInfoOverlay> {
    let raw = compression::decompress(blob)?;
    Ok(serde_json::from_slice(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::BeatmapStore;
    use crate::wire::ByteWriter;

    struct FailingLookup;

    impl BeatmapLookup for FailingLookup {
        fn find_by_hash(&self, _hash: &str) -> Result<Option<Beatmap>> {
            Err(Error::BeatmapLookupFailed("database offline".to_string()))
        }
    }

    /// Minimal legacy container with an optional raw replay blob.
    fn legacy_container(ruleset_id: u8, replay: Option<&[u8]>) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.write_u8(ruleset_id);
        w.write_i32(20_140_721);
        w.write_string(Some("beatmap-hash"));
        w.write_string(Some("player"));
        w.write_string(Some("replay-hash"));
        for count in [10u16, 2, 1, 0, 0, 3] {
            w.write_u16(count);
        }
        w.write_i32(123_456);
        w.write_u16(50);
        w.write_bool(false);
        w.write_i32(LegacyMods::HIDDEN.to_wire());
        w.write_string(Some(""));
        w.write_i64(crate::wire::UNIX_EPOCH_TICKS);
        w.write_byte_array(replay).unwrap();
        w.write_i64(987);
        w.into_inner()
    }

    #[test]
    fn test_decode_legacy_fields() {
        let decoder = ScoreDecoder::new(RulesetRegistry::builtin());
        let decoded = decoder.decode(&legacy_container(0, None)).unwrap();
        let score = decoded.score;

        assert!(decoded.issues.is_empty());
        assert!(score.is_legacy());
        assert_eq!(score.username, "player");
        assert_eq!(score.replay_hash, "replay-hash");
        assert_eq!(score.legacy_online_id, Some(987));
        assert_eq!(score.legacy_total_score, Some(123_456));
        assert_eq!(score.max_combo, 50);
        assert_eq!(score.mods, vec![Mod::new("HD"), Mod::classic()]);
        assert_eq!(score.count(crate::ruleset::HitResult::Great), 10);
        assert_eq!(score.date.timestamp(), 0);
        assert!(score.replay.is_none());
    }

    #[test]
    fn test_corrupt_replay_degrades() {
        let decoder = ScoreDecoder::new(RulesetRegistry::builtin());
        let decoded = decoder
            .decode(&legacy_container(0, Some(&[1u8, 2, 3][..])))
            .unwrap();

        assert!(decoded.score.replay.is_none());
        assert!(matches!(decoded.issues[..], [DecodeIssue::ReplayDropped(_)]));
    }

    #[test]
    fn test_corrupt_replay_strict() {
        let decoder =
            ScoreDecoder::new(RulesetRegistry::builtin()).with_options(DecodeOptions::strict());
        let result = decoder.decode(&legacy_container(0, Some(&[1u8, 2, 3][..])));

        assert!(matches!(result, Err(Error::CorruptPayload(_))));
    }

    #[test]
    fn test_lookup_failure_degrades() {
        let decoder =
            ScoreDecoder::new(RulesetRegistry::builtin()).with_beatmap_lookup(Arc::new(FailingLookup));
        let decoded = decoder.decode(&legacy_container(0, None)).unwrap();

        assert!(decoded.beatmap.is_none());
        assert!(matches!(
            decoded.issues[..],
            [DecodeIssue::BeatmapLookupFailed(_)]
        ));
    }

    #[test]
    fn test_beatmap_resolved() {
        let store: BeatmapStore = [Beatmap {
            md5_hash: "beatmap-hash".to_string(),
            format_version: 14,
            hit_object_count: 10,
            total_columns: None,
        }]
        .into_iter()
        .collect();
        let decoder =
            ScoreDecoder::new(RulesetRegistry::builtin()).with_beatmap_lookup(Arc::new(store));
        let decoded = decoder.decode(&legacy_container(0, None)).unwrap();

        assert_eq!(decoded.beatmap.as_ref().map(|b| b.format_version), Some(14));
        assert!(decoded.is_complete());
    }

    #[test]
    fn test_unknown_ruleset() {
        let decoder = ScoreDecoder::new(RulesetRegistry::builtin());
        let result = decoder.decode(&legacy_container(7, None));

        assert!(matches!(result, Err(Error::UnknownRuleset(7))));
    }

    #[test]
    fn test_online_id() {
        assert_eq!(online_id(-1), None);
        assert_eq!(online_id(0), Some(0));
        assert_eq!(online_id(5), Some(5));
    }
}
