use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unexpected end of input at position {position}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEndOfInput {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Unknown ruleset id: {0}")]
    UnknownRuleset(u8),

    #[error("Corrupt compressed payload: {0}")]
    CorruptPayload(String),

    #[error("Ruleset {ruleset} needs a beatmap to convert replay frames")]
    BeatmapRequiredForConversion { ruleset: &'static str },

    #[error("Beatmap lookup failed: {0}")]
    BeatmapLookupFailed(String),

    #[error("Malformed replay frame #{index}: {message}")]
    MalformedFrame { index: usize, message: String },

    #[error("Invalid field {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Frame of kind {frame_kind} cannot be written by ruleset {ruleset}")]
    UnconvertibleFrame {
        ruleset: &'static str,
        frame_kind: &'static str,
    },

    #[error("Difficulty calculation failed: {0}")]
    DifficultyCalculationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            message: message.into(),
        }
    }
}
