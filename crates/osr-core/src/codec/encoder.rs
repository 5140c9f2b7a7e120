use std::path::Path;

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use tracing::{debug, info};

use super::layout::{trailing_fields, TrailingField};
use crate::beatmap::Beatmap;
use crate::compression;
use crate::config::encoding::{EDITED_SUFFIX, REPLAY_HASH_PREFIX};
use crate::config::version::export_version_for;
use crate::config::EncodeOptions;
use crate::error::Result;
use crate::replay::encode_timeline;
use crate::ruleset::RulesetRegistry;
use crate::score::{LegacyCounts, Score, ScoreInfoOverlay};
use crate::wire::ByteWriter;

/// Writes scores into the legacy container.
#[derive(Debug, Clone)]
pub struct ScoreEncoder {
    registry: RulesetRegistry,
    beatmap: Option<Beatmap>,
    options: EncodeOptions,
}

impl ScoreEncoder {
    pub fn new(registry: RulesetRegistry) -> Self {
        Self {
            registry,
            beatmap: None,
            options: EncodeOptions::default(),
        }
    }

    /// Beatmap the score was played on. Its frame time offset is removed
    /// from the written replay.
    pub fn with_beatmap(mut self, beatmap: Beatmap) -> Self {
        self.beatmap = Some(beatmap);
        self
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn encode_to_file<P: AsRef<Path>>(&self, score: &Score, path: P) -> Result<()> {
        let bytes = self.encode(score)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote {} bytes to {:?}", bytes.len(), path.as_ref());
        Ok(())
    }

    pub fn encode(&self, score: &Score) -> Result<Vec<u8>> {
        let ruleset = self.registry.get(score.ruleset_id)?;
        let version = export_version_for(score.format_version);
        let offset = self
            .beatmap
            .as_ref()
            .map_or(0.0, Beatmap::legacy_frame_time_offset);

        let username = if self.options.mark_edited {
            format!("{}{}", score.username, EDITED_SUFFIX)
        } else {
            score.username.clone()
        };

        let mut w = ByteWriter::new();
        w.write_u8(score.ruleset_id);
        w.write_i32(version);
        w.write_string(Some(&score.beatmap_hash));
        w.write_string(Some(&username));
        w.write_string(Some(&replay_hash_placeholder(&username, &score.date)));

        let counts = LegacyCounts::from_statistics(score.ruleset_id, &score.statistics);
        for count in [
            counts.count_300,
            counts.count_100,
            counts.count_50,
            counts.count_geki,
            counts.count_katu,
            counts.count_miss,
        ] {
            w.write_u16(count);
        }

        w.write_i32(clamp_i32(score.total_score));
        w.write_u16(u16::try_from(score.max_combo).unwrap_or(u16::MAX));
        w.write_bool(score.is_perfect());
        w.write_i32(ruleset.mods_to_legacy(&score.mods).to_wire());
        w.write_string(Some(""));
        w.write_datetime(&score.date)?;

        match &score.replay {
            Some(replay) => {
                let text = encode_timeline(&replay.frames, ruleset.as_ref(), offset)?;
                let blob = compression::compress(text.as_bytes())?;
                w.write_byte_array(Some(blob.as_slice()))?;
            }
            None => w.write_byte_array(Some(&[][..]))?,
        }

        for field in trailing_fields(version) {
            match field {
                TrailingField::LegacyOnlineIdI32 => {
                    let id = score
                        .legacy_online_id
                        .and_then(|id| i32::try_from(id).ok())
                        .unwrap_or(-1);
                    w.write_i32(id);
                }
                TrailingField::LegacyOnlineIdI64 => {
                    w.write_i64(score.legacy_online_id.unwrap_or(-1));
                }
                TrailingField::ScoreInfoOverlay => {
                    let json = serde_json::to_vec(&ScoreInfoOverlay::from_score(score))?;
                    let blob = compression::compress(&json)?;
                    w.write_byte_array(Some(blob.as_slice()))?;
                }
            }
        }

        debug!(
            "Encoded {} score at version {} ({} frames)",
            ruleset.short_name(),
            version,
            score.frame_count()
        );
        Ok(w.into_inner())
    }
}

/// Stand-in for the second hash field, which modern clients do not compute
/// from replay data.
pub fn replay_hash_placeholder(username: &str, date: &DateTime<Utc>) -> String {
    let input = format!(
        "{}-{}-{}",
        REPLAY_HASH_PREFIX,
        username,
        date.format("%m/%d/%Y %H:%M:%S %:z")
    );
    let digest = Md5::digest(input.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
