//! Mods and the legacy mod bitmask.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Legacy 32-bit mod flag set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LegacyMods: u32 {
        const NO_FAIL = 1;
        const EASY = 1 << 1;
        const TOUCH_DEVICE = 1 << 2;
        const HIDDEN = 1 << 3;
        const HARD_ROCK = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        const DOUBLE_TIME = 1 << 6;
        const RELAX = 1 << 7;
        const HALF_TIME = 1 << 8;
        const NIGHTCORE = 1 << 9;
        const FLASHLIGHT = 1 << 10;
        const AUTOPLAY = 1 << 11;
        const SPUN_OUT = 1 << 12;
        const AUTOPILOT = 1 << 13;
        const PERFECT = 1 << 14;
        const KEY4 = 1 << 15;
        const KEY5 = 1 << 16;
        const KEY6 = 1 << 17;
        const KEY7 = 1 << 18;
        const KEY8 = 1 << 19;
        const FADE_IN = 1 << 20;
        const RANDOM = 1 << 21;
        const CINEMA = 1 << 22;
        const TARGET = 1 << 23;
        const KEY9 = 1 << 24;
        const KEY_COOP = 1 << 25;
        const KEY1 = 1 << 26;
        const KEY3 = 1 << 27;
        const KEY2 = 1 << 28;
        const SCORE_V2 = 1 << 29;
        const MIRROR = 1 << 30;
    }
}

impl LegacyMods {
    /// Interprets the signed wire value as a flag set, keeping unknown bits.
    pub fn from_wire(value: i32) -> Self {
        Self::from_bits_retain(value as u32)
    }

    pub fn to_wire(self) -> i32 {
        self.bits() as i32
    }
}

/// Acronym of the marker mod carried by scores set on the legacy client.
pub const CLASSIC_ACRONYM: &str = "CL";

/// A mod as stored in the score-info overlay: an acronym plus free-form
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    pub acronym: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl Mod {
    pub fn new(acronym: impl Into<String>) -> Self {
        Self {
            acronym: acronym.into(),
            settings: BTreeMap::new(),
        }
    }

    pub fn classic() -> Self {
        Self::new(CLASSIC_ACRONYM)
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    pub fn is(&self, acronym: &str) -> bool {
        self.acronym.eq_ignore_ascii_case(acronym)
    }
}

impl std::fmt::Display for Mod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.acronym)
    }
}

/// One row of a ruleset's mod table.
///
/// `flag` identifies the mod in a legacy bitmask and `implies` lists the bits
/// the legacy client always set alongside it (Nightcore also sets
/// DoubleTime). Rows without a `flag` have no legacy representation.
#[derive(Debug, Clone, Copy)]
pub struct ModMapping {
    pub acronym: &'static str,
    pub flag: LegacyMods,
    pub implies: LegacyMods,
    pub multiplier: f64,
}

impl ModMapping {
    pub const fn new(acronym: &'static str, flag: LegacyMods, multiplier: f64) -> Self {
        Self {
            acronym,
            flag,
            implies: LegacyMods::empty(),
            multiplier,
        }
    }

    pub const fn implying(mut self, implies: LegacyMods) -> Self {
        self.implies = implies;
        self
    }

    pub const fn modern(acronym: &'static str, multiplier: f64) -> Self {
        Self::new(acronym, LegacyMods::empty(), multiplier)
    }

    fn legacy_bits(&self) -> LegacyMods {
        self.flag | self.implies
    }
}

/// Expands a legacy bitmask through `table`.
///
/// Rows are tried in table order; a row whose flag was already consumed as an
/// implied bit of an earlier row is skipped, so superseding mods must be
/// listed before the mods they imply.
pub fn mods_from_legacy(table: &[ModMapping], bits: LegacyMods) -> Vec<Mod> {
    let mut consumed = LegacyMods::empty();
    let mut mods = Vec::new();

    for mapping in table {
        if mapping.flag.is_empty() || !bits.contains(mapping.flag) || consumed.contains(mapping.flag)
        {
            continue;
        }
        consumed |= mapping.legacy_bits();
        mods.push(Mod::new(mapping.acronym));
    }

    mods
}

/// Collapses mods into a legacy bitmask. Mods without a legacy flag are
/// dropped.
pub fn mods_to_legacy(table: &[ModMapping], mods: &[Mod]) -> LegacyMods {
    mods.iter()
        .filter_map(|m| table.iter().find(|mapping| m.is(mapping.acronym)))
        .fold(LegacyMods::empty(), |bits, mapping| bits | mapping.legacy_bits())
}

/// Product of the score multipliers of `mods`. Unknown mods count as 1.
pub fn score_multiplier(table: &[ModMapping], mods: &[Mod]) -> f64 {
    mods.iter()
        .filter_map(|m| table.iter().find(|mapping| m.is(mapping.acronym)))
        .map(|mapping| mapping.multiplier)
        .product()
}
