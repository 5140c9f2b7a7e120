//! LZMA envelope used by the replay and score-info blobs.
//!
//! ```text
//! 5-byte properties | 8-byte LE uncompressed size | LZMA body
//! ```
//!
//! This is the classic `.lzma` ("LZMA alone") layout, so the body is handed to
//! `lzma-rs` together with its header.

use std::io::Cursor;

use lzma_rs::compress::{Options as CompressOptions, UnpackedSize as CompressSize};
use lzma_rs::decompress::{Options as DecompressOptions, UnpackedSize};
use tracing::debug;

use crate::config::compression::{
    DICTIONARY_SIZE, PROPERTIES_SIZE, UNCOMPRESSED_SIZE_FIELD, UNKNOWN_SIZE,
};
use crate::error::{Error, Result};

const HEADER_SIZE: usize = PROPERTIES_SIZE + UNCOMPRESSED_SIZE_FIELD;

/// Declared uncompressed size of a blob, `None` when the size is unknown.
pub fn declared_size(data: &[u8]) -> Result<Option<u64>> {
    if data.len() < PROPERTIES_SIZE {
        return Err(Error::CorruptPayload(format!(
            "{} bytes is too short for the properties header",
            data.len()
        )));
    }
    if data.len() < HEADER_SIZE {
        return Err(Error::CorruptPayload(format!(
            "{} bytes is too short for the uncompressed size field",
            data.len()
        )));
    }
    let mut size = [0u8; UNCOMPRESSED_SIZE_FIELD];
    size.copy_from_slice(&data[PROPERTIES_SIZE..HEADER_SIZE]);
    let size = u64::from_le_bytes(size);
    Ok((size != UNKNOWN_SIZE).then_some(size))
}

/// Decompresses a blob.
///
/// # Errors
///
/// Returns `CorruptPayload` if the header is truncated, the body is not a
/// valid LZMA stream, or the output does not match the declared size.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let declared = declared_size(data)?;
    debug!(
        "Decompressing {} byte blob (declared size {:?})",
        data.len(),
        declared
    );

    let mut output = Vec::with_capacity(declared.unwrap_or(0).min(data.len() as u64 * 8) as usize);
    let options = DecompressOptions {
        unpacked_size: UnpackedSize::ReadFromHeader,
        ..Default::default()
    };
    lzma_rs::lzma_decompress_with_options(&mut Cursor::new(data), &mut output, &options)
        .map_err(|e| Error::CorruptPayload(e.to_string()))?;

    match declared {
        Some(size) if output.len() as u64 != size => {
            return Err(Error::CorruptPayload(format!(
                "declared {} bytes, decompressed {}",
                size,
                output.len()
            )));
        }
        _ => {}
    }

    Ok(output)
}

/// Compresses a blob, writing the dictionary size the legacy client uses.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(HEADER_SIZE + data.len());
    let options = CompressOptions {
        unpacked_size: CompressSize::WriteToHeader(Some(data.len() as u64)),
    };
    lzma_rs::lzma_compress_with_options(&mut Cursor::new(data), &mut output, &options)?;

    if output.len() < HEADER_SIZE {
        return Err(Error::CorruptPayload(
            "compressor produced a truncated header".to_string(),
        ));
    }
    // lzma-rs only emits literals, so the dictionary size is free to choose.
    output[1..PROPERTIES_SIZE].copy_from_slice(&DICTIONARY_SIZE.to_le_bytes());

    Ok(output)
}
