pub mod beatmap;
pub mod codec;
pub mod compression;
pub mod config;
pub mod error;
pub mod export;
pub mod replay;
pub mod ruleset;
pub mod score;
pub mod wire;

pub use beatmap::{Beatmap, BeatmapLookup, BeatmapStore, DifficultyAttributes, DifficultyCalculator};
pub use codec::{DecodeContext, DecodeIssue, DecodedScore, ScoreDecoder, ScoreEncoder};
pub use config::{DecodeOptions, EncodeOptions};
pub use error::{Error, Result};
pub use replay::{Frame, FrameInput, LegacyReplayFrame, Replay};
pub use ruleset::{HitResult, LegacyMods, Mod, Ruleset, RulesetRegistry};
pub use score::{LegacyCounts, Score, ScoreInfoOverlay, ScoreRank};
