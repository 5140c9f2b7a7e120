//! Position-tracking reader for the legacy container.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{STRING_NULL_MARKER, STRING_PRESENT_MARKER, ticks_to_datetime};
use crate::error::{Error, Result};

/// A position-tracking byte reader for the legacy score container.
///
/// `ByteBuffer` wraps a byte slice and maintains a current position, allowing
/// sequential reads of the primitive types the container is built from.
/// All integers are little-endian.
///
/// # Example
///
/// ```
/// use osr_core::wire::ByteBuffer;
///
/// let data = [0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00];
/// let mut buf = ByteBuffer::new(&data);
///
/// let value = buf.read_i32().unwrap();
/// assert_eq!(value, 0x12345678);
/// assert_eq!(buf.position(), 4);
/// ```
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Creates a new `ByteBuffer` wrapping the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Reads the specified number of bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEndOfInput` if there are not enough bytes remaining.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::UnexpectedEndOfInput {
                position: self.pos,
                needed: count,
                remaining: self.remaining(),
            })?;

        let result = &self.data[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Reads an unsigned 8-bit integer and advances the position.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a boolean stored as a single byte (any non-zero value is true).
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads an unsigned 16-bit integer and advances the position.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 32-bit integer and advances the position.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 64-bit integer and advances the position.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads a 7-bit encoded length (at most five groups, like .NET's
    /// `Read7BitEncodedInt`).
    pub fn read_7bit_length(&mut self) -> Result<usize> {
        let mut value: u32 = 0;
        for group in 0..5 {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << (7 * group);
            if byte & 0x80 == 0 {
                return usize::try_from(value as i32)
                    .map_err(|_| Error::invalid_field("string length", "negative length"));
            }
        }
        Err(Error::invalid_field(
            "string length",
            "7-bit encoded length longer than five bytes",
        ))
    }

    /// Reads a nullable string.
    ///
    /// A `0x00` marker is a null string, `0x0B` is followed by a 7-bit encoded
    /// byte length and UTF-8 content.
    pub fn read_string(&mut self) -> Result<Option<String>> {
        let start = self.pos;
        match self.read_u8()? {
            STRING_NULL_MARKER => Ok(None),
            STRING_PRESENT_MARKER => {
                let len = self.read_7bit_length()?;
                let bytes = self.read_bytes(len)?;
                String::from_utf8(bytes.to_vec())
                    .map(Some)
                    .map_err(|e| Error::invalid_field("string", e.to_string()))
            }
            marker => {
                debug!("Bad string marker {:#04x} at position {}", marker, start);
                Err(Error::invalid_field(
                    "string",
                    format!("unknown marker {:#04x} at position {}", marker, start),
                ))
            }
        }
    }

    /// Reads a nullable string, mapping null to an empty string.
    pub fn read_string_or_empty(&mut self) -> Result<String> {
        Ok(self.read_string()?.unwrap_or_default())
    }

    /// Reads an `i32`-length-prefixed byte block.
    ///
    /// Negative lengths are null, zero is an empty block.
    pub fn read_byte_array(&mut self) -> Result<Option<&'a [u8]>> {
        let len = self.read_i32()?;
        if len < 0 {
            return Ok(None);
        }
        self.read_bytes(len as usize).map(Some)
    }

    /// Reads a UTC timestamp stored as .NET ticks.
    pub fn read_datetime(&mut self) -> Result<DateTime<Utc>> {
        let ticks = self.read_i64()?;
        ticks_to_datetime(ticks)
    }
}
