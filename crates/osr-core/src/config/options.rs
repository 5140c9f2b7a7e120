use serde::{Deserialize, Serialize};

/// Options controlling how much damage the decoder tolerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Fail on a corrupt replay/overlay blob or an unconvertible replay
    /// instead of dropping the affected part.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Options for exporting a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Append the edited marker to the username.
    pub mark_edited: bool,
}
