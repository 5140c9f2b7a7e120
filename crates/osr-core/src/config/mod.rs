//! Format constants and codec options.
//!
//! This module groups the magic numbers of the legacy container:
//! - Format version thresholds (see `version`)
//! - Replay timeline constants
//! - Compression envelope constants
//! - `DecodeOptions` / `EncodeOptions`

mod options;
pub mod version;

pub use options::*;

/// Replay timeline constants.
pub mod replay {
    /// First field of the terminating record of a replay timeline.
    pub const SENTINEL_DELTA: &str = "-12345";

    /// Terminating record written after the last frame.
    pub const SENTINEL_RECORD: &str = "-12345|0|0|0";

    /// Coordinates of the two placeholder frames the legacy client writes
    /// at the start of every replay.
    pub const PLACEHOLDER_POSITION: (f32, f32) = (256.0, -500.0);

    /// Only the first two records can be placeholders.
    pub const PLACEHOLDER_RECORDS: usize = 2;

    /// Hit objects of beatmaps older than this format version were shifted,
    /// and replay frames with them.
    pub const EARLY_TIMING_BEATMAP_VERSION: i32 = 5;

    /// Offset (in ms) applied to frames of early-version beatmaps.
    pub const EARLY_VERSION_TIMING_OFFSET: f64 = 24.0;

    /// Largest accepted absolute coordinate.
    pub const MAX_COORDINATE_VALUE: f32 = 131_072.0;

    /// Largest accepted absolute delta or button state.
    pub const MAX_PARSE_VALUE: f64 = i32::MAX as f64;
}

/// Compressed blob envelope constants.
pub mod compression {
    /// Length of the LZMA properties header (lc/lp/pb byte + dictionary size).
    pub const PROPERTIES_SIZE: usize = 5;

    /// Length of the little-endian uncompressed size field.
    pub const UNCOMPRESSED_SIZE_FIELD: usize = 8;

    /// Dictionary size written into the properties header.
    pub const DICTIONARY_SIZE: u32 = 1 << 21;

    /// Uncompressed size value meaning "unknown, read until end marker".
    pub const UNKNOWN_SIZE: u64 = u64::MAX;
}

/// Encoder constants.
pub mod encoding {
    /// Marker appended to the username of an edited export.
    pub const EDITED_SUFFIX: &str = " (edited)";

    /// Prefix of the string hashed into the replay hash placeholder.
    pub const REPLAY_HASH_PREFIX: &str = "lazer";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_record_starts_with_sentinel_delta() {
        assert!(replay::SENTINEL_RECORD.starts_with(replay::SENTINEL_DELTA));
        assert_eq!(replay::SENTINEL_RECORD.split('|').count(), 4);
    }

    #[test]
    fn test_compression_header_size() {
        assert_eq!(
            compression::PROPERTIES_SIZE + compression::UNCOMPRESSED_SIZE_FIELD,
            13
        );
        assert_eq!(compression::DICTIONARY_SIZE, 2_097_152);
    }
}
