//! LZ4 raw block decompression of the cell payload.
//!
//! The payload carries no size prefix or frame markers, so the expected
//! output size must come from the frame header.

use crate::error::{Error, Result};

/// Upper bound on a declared decompressed size (256 MiB)
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// Decompress `payload` into exactly `original_size` bytes.
///
/// A decoder error and a short result are both treated as corruption;
/// a partially decoded buffer is never returned.
pub fn decompress_block(payload: &[u8], original_size: usize) -> Result<Vec<u8>> {
    decompress_block_with_limit(payload, original_size, MAX_DECOMPRESSED_SIZE)
}

/// Same as [`decompress_block`] with an explicit size limit
pub fn decompress_block_with_limit(
    payload: &[u8],
    original_size: usize,
    limit: usize,
) -> Result<Vec<u8>> {
    if original_size > limit {
        return Err(Error::Decompression(format!(
            "declared size {} exceeds limit of {} bytes",
            original_size, limit
        )));
    }

    let mut cells = vec![0u8; original_size];
    let written = lz4_flex::block::decompress_into(payload, &mut cells)
        .map_err(|e| Error::Decompression(format!("LZ4 block decode failed: {}", e)))?;

    if written != original_size {
        return Err(Error::Decompression(format!(
            "decompressed size mismatch: expected {}, got {}",
            original_size, written
        )));
    }

    log::debug!(
        "Decompressed {} -> {} bytes",
        payload.len(),
        original_size
    );
    Ok(cells)
}
