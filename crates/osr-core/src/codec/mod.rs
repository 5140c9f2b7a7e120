//! The score container codec.
//!
//! - `ScoreDecoder` - bytes → `Score` (+ resolved beatmap, decode issues)
//! - `ScoreEncoder` - `Score` → bytes
//! - `layout` - version-gated trailing fields shared by both directions

mod context;
mod decoder;
mod encoder;
pub mod layout;

pub use context::DecodeContext;
pub use decoder::{DecodeIssue, DecodedScore, ScoreDecoder};
pub use encoder::{replay_hash_placeholder, ScoreEncoder};
