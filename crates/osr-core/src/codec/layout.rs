//! Version-gated fields at the tail of the container.

use crate::config::version::{ONLINE_ID_I32_VERSION, ONLINE_ID_I64_VERSION, SCORE_INFO_OVERLAY_VERSION};

/// Half-open range of format versions, `min..max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub min: i32,
    pub max: Option<i32>,
}

impl VersionRange {
    /// Every version from `min` on.
    pub const fn from(min: i32) -> Self {
        Self { min, max: None }
    }

    /// Versions from `min` up to, not including, `max`.
    pub const fn between(min: i32, max: i32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn contains(&self, version: i32) -> bool {
        version >= self.min && self.max.is_none_or(|max| version < max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingField {
    /// Legacy online id stored as `i32`.
    LegacyOnlineIdI32,
    /// Legacy online id stored as `i64`.
    LegacyOnlineIdI64,
    /// LZMA-compressed JSON score-info overlay.
    ScoreInfoOverlay,
}

/// Trailing fields in wire order, each with the versions that carry it.
pub const TRAILING_FIELDS: &[(VersionRange, TrailingField)] = &[
    (
        VersionRange::between(ONLINE_ID_I32_VERSION, ONLINE_ID_I64_VERSION),
        TrailingField::LegacyOnlineIdI32,
    ),
    (
        VersionRange::from(ONLINE_ID_I64_VERSION),
        TrailingField::LegacyOnlineIdI64,
    ),
    (
        VersionRange::from(SCORE_INFO_OVERLAY_VERSION),
        TrailingField::ScoreInfoOverlay,
    ),
];

/// Trailing fields present in a container of `version`, in wire order.
pub fn trailing_fields(version: i32) -> impl Iterator<Item = TrailingField> {
    TRAILING_FIELDS
        .iter()
        .filter(move |(range, _)| range.contains(version))
        .map(|&(_, field)| field)
}
