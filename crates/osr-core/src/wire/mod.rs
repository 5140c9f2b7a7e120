//! Binary cursor over the legacy container.
//!
//! - `ByteBuffer` - sequential reader over a byte slice
//! - `ByteWriter` - growable writer producing the same layout
//!
//! Strings and byte blocks follow the .NET serialization conventions of the
//! legacy client; timestamps are .NET ticks.

mod reader;
mod writer;

pub use reader::ByteBuffer;
pub use writer::ByteWriter;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Marker byte of a null string.
pub const STRING_NULL_MARKER: u8 = 0x00;

/// Marker byte preceding a present string.
pub const STRING_PRESENT_MARKER: u8 = 0x0B;

/// Ticks (100ns units) between 0001-01-01 and the Unix epoch.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Ticks per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Converts .NET ticks to a UTC timestamp.
pub fn ticks_to_datetime(ticks: i64) -> Result<DateTime<Utc>> {
    if ticks < 0 {
        return Err(Error::invalid_field(
            "date",
            format!("negative tick count {}", ticks),
        ));
    }
    let since_epoch = ticks - UNIX_EPOCH_TICKS;
    let secs = since_epoch.div_euclid(TICKS_PER_SECOND);
    let nanos = (since_epoch.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
        .ok_or_else(|| Error::invalid_field("date", format!("tick count {} out of range", ticks)))
}

/// Converts a UTC timestamp to .NET ticks.
pub fn datetime_to_ticks(value: &DateTime<Utc>) -> Result<i64> {
    let out_of_range = || Error::invalid_field("date", format!("{} not representable", value));
    let ticks = value
        .timestamp()
        .checked_mul(TICKS_PER_SECOND)
        .and_then(|t| t.checked_add(i64::from(value.timestamp_subsec_nanos() / 100)))
        .and_then(|t| t.checked_add(UNIX_EPOCH_TICKS))
        .ok_or_else(out_of_range)?;
    if ticks < 0 {
        return Err(out_of_range());
    }
    Ok(ticks)
}
