use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// A judgement kind.
///
/// Serialized in snake_case, matching the keys of the score-info overlay's
/// statistics maps.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HitResult {
    #[default]
    None,
    Miss,
    Meh,
    Ok,
    Good,
    Great,
    Perfect,
    SmallTickMiss,
    SmallTickHit,
    LargeTickMiss,
    LargeTickHit,
    SmallBonus,
    LargeBonus,
    IgnoreMiss,
    IgnoreHit,
    ComboBreak,
    SliderTailHit,
    /// Pads the combo of legacy scores up to the beatmap's max combo.
    LegacyComboIncrease,
}

impl HitResult {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Judgements of regular hit objects.
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            Self::Miss | Self::Meh | Self::Ok | Self::Good | Self::Great | Self::Perfect
        )
    }

    pub fn is_tick(&self) -> bool {
        matches!(
            self,
            Self::SmallTickMiss
                | Self::SmallTickHit
                | Self::LargeTickMiss
                | Self::LargeTickHit
                | Self::SliderTailHit
        )
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self, Self::SmallBonus | Self::LargeBonus)
    }

    pub fn affects_combo(&self) -> bool {
        matches!(
            self,
            Self::Miss
                | Self::Meh
                | Self::Ok
                | Self::Good
                | Self::Great
                | Self::Perfect
                | Self::LargeTickHit
                | Self::LargeTickMiss
                | Self::SliderTailHit
                | Self::ComboBreak
                | Self::LegacyComboIncrease
        )
    }

    /// Score awarded for this judgement before mod multipliers.
    pub fn base_score(&self) -> u32 {
        match self {
            Self::SmallTickHit => 10,
            Self::LargeTickHit => 30,
            Self::SliderTailHit => 150,
            Self::Meh => 50,
            Self::Ok => 100,
            Self::Good => 200,
            Self::Great => 300,
            Self::Perfect => 315,
            Self::SmallBonus => 10,
            Self::LargeBonus => 50,
            _ => 0,
        }
    }
}

impl std::fmt::Display for HitResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
