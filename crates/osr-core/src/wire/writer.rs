//! Growable writer for the legacy container.

use chrono::{DateTime, Utc};

use super::{STRING_NULL_MARKER, STRING_PRESENT_MARKER, datetime_to_ticks};
use crate::error::{Error, Result};

/// Byte writer producing the layout `ByteBuffer` reads.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Writes a length as 7-bit groups, low bits first.
    pub fn write_7bit_length(&mut self, len: usize) {
        let mut value = len as u32;
        while value >= 0x80 {
            self.write_u8((value as u8) | 0x80);
            value >>= 7;
        }
        self.write_u8(value as u8);
    }

    /// Writes a nullable string.
    pub fn write_string(&mut self, value: Option<&str>) {
        match value {
            None => self.write_u8(STRING_NULL_MARKER),
            Some(s) => {
                self.write_u8(STRING_PRESENT_MARKER);
                self.write_7bit_length(s.len());
                self.write_bytes(s.as_bytes());
            }
        }
    }

    /// Writes an `i32`-length-prefixed byte block (`-1` for null).
    pub fn write_byte_array(&mut self, value: Option<&[u8]>) -> Result<()> {
        match value {
            None => self.write_i32(-1),
            Some(bytes) => {
                let len = i32::try_from(bytes.len()).map_err(|_| {
                    Error::invalid_field(
                        "byte array",
                        format!("{} bytes exceed the i32 length prefix", bytes.len()),
                    )
                })?;
                self.write_i32(len);
                self.write_bytes(bytes);
            }
        }
        Ok(())
    }

    /// Writes a UTC timestamp as .NET ticks.
    pub fn write_datetime(&mut self, value: &DateTime<Utc>) -> Result<()> {
        self.write_i64(datetime_to_ticks(value)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ByteBuffer;

    #[test]
    fn test_write_integers_little_endian() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x0102);
        writer.write_i32(-2);

        assert_eq!(writer.into_inner(), vec![0x02, 0x01, 0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_write_7bit_length() {
        let mut writer = ByteWriter::new();
        writer.write_7bit_length(300);

        assert_eq!(writer.into_inner(), vec![0xAC, 0x02]);
    }

    #[test]
    fn test_strings_read_back() {
        let mut writer = ByteWriter::new();
        writer.write_string(Some("peppy"));
        writer.write_string(None);
        writer.write_string(Some(""));
        let bytes = writer.into_inner();

        let mut buf = ByteBuffer::new(&bytes);
        assert_eq!(buf.read_string().unwrap().as_deref(), Some("peppy"));
        assert_eq!(buf.read_string().unwrap(), None);
        assert_eq!(buf.read_string().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_null_byte_array() {
        let mut writer = ByteWriter::new();
        writer.write_byte_array(None).unwrap();

        assert_eq!(writer.into_inner(), vec![0xFF; 4]);
    }
}
