//! Format version numbers.
//!
//! Legacy clients wrote their build date (`yyyymmdd`) as the version. Modern
//! exports use versions starting at `FIRST_LAZER_VERSION`, well above any
//! date.

/// First version written by the modern client.
pub const FIRST_LAZER_VERSION: i32 = 30_000_000;

/// Version written by the encoder.
pub const LATEST_VERSION: i32 = 30_000_016;

/// Legacy online ids are stored as `i32` from this version on.
pub const ONLINE_ID_I32_VERSION: i32 = 20_121_008;

/// Legacy online ids are stored as `i64` from this version on.
pub const ONLINE_ID_I64_VERSION: i32 = 20_140_721;

/// The compressed score-info overlay is present from this version on.
pub const SCORE_INFO_OVERLAY_VERSION: i32 = 30_000_001;

/// Total scores of versions below this use the legacy total score format.
pub const FIRST_STANDARDISED_TOTAL_SCORE_VERSION: i32 = 30_000_002;

/// Total score format version assigned to scores below
/// `FIRST_STANDARDISED_TOTAL_SCORE_VERSION`.
pub const LEGACY_TOTAL_SCORE_VERSION: i32 = 30_000_001;

/// Whether a score with this format version was written by a legacy client.
pub fn is_legacy_version(version: i32) -> bool {
    version < FIRST_LAZER_VERSION
}

/// Total score format version of a score decoded from `version`.
///
/// Not derivable from other fields, so it is fixed at decode time.
pub fn total_score_version_for(version: i32) -> i32 {
    if version < FIRST_STANDARDISED_TOTAL_SCORE_VERSION {
        LEGACY_TOTAL_SCORE_VERSION
    } else {
        LATEST_VERSION
    }
}

/// Version the encoder writes for a score decoded with `version`.
///
/// Versions that carry the overlay are kept; anything older is promoted,
/// since the encoder always writes the overlay.
pub fn export_version_for(version: i32) -> i32 {
    if version >= SCORE_INFO_OVERLAY_VERSION {
        version
    } else {
        LATEST_VERSION
    }
}
