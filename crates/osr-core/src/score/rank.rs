use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Letter rank of a score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumIter,
    IntoStaticStr,
)]
pub enum ScoreRank {
    #[default]
    F,
    D,
    C,
    B,
    A,
    S,
    /// S with a visibility-reducing mod.
    #[serde(rename = "SH")]
    #[strum(serialize = "SH")]
    Sh,
    X,
    /// X with a visibility-reducing mod.
    #[serde(rename = "XH")]
    #[strum(serialize = "XH")]
    Xh,
}

impl ScoreRank {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    pub fn is_pass(&self) -> bool {
        *self != Self::F
    }
}

impl std::fmt::Display for ScoreRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
