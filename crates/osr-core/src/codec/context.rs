use crate::beatmap::Beatmap;
use crate::ruleset::Ruleset;

/// State shared by the decode steps of one score.
#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
    pub ruleset: &'a dyn Ruleset,
    pub beatmap: Option<&'a Beatmap>,
    /// Added to every decoded frame time.
    pub frame_time_offset: f64,
}

impl<'a> DecodeContext<'a> {
    /// Context for `ruleset`, taking the frame time offset from `beatmap`.
    pub fn new(ruleset: &'a dyn Ruleset, beatmap: Option<&'a Beatmap>) -> Self {
        Self {
            ruleset,
            beatmap,
            frame_time_offset: beatmap.map_or(0.0, Beatmap::legacy_frame_time_offset),
        }
    }

    pub fn has_beatmap(&self) -> bool {
        self.beatmap.is_some()
    }
}

impl std::fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeContext")
            .field("ruleset", &self.ruleset.short_name())
            .field("beatmap", &self.beatmap.map(|b| b.md5_hash.as_str()))
            .field("frame_time_offset", &self.frame_time_offset)
            .finish()
    }
}
