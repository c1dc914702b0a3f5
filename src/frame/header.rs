//! Fixed 30-byte map frame header.
//!
//! Layout (all little-endian):
//!
//! ```text
//! offset  field            type
//! 0       id               i16
//! 2       original_size    i32
//! 6       compressed_size  i32
//! 10      width            i32
//! 14      height           i32
//! 18      resolution       f32
//! 22      origin_x         f32
//! 26      origin_y         f32
//! 30      payload          compressed_size bytes (LZ4 raw block)
//! ```

use crate::error::{Error, Result};

/// Header size in bytes
pub const HEADER_SIZE: usize = 30;

/// Decoded frame header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    /// Map identifier assigned by the device
    pub id: i16,
    /// Decompressed cell buffer length in bytes
    pub original_size: u32,
    /// LZ4 payload length in bytes
    pub compressed_size: u32,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Cell size as reported by the device
    pub resolution: f32,
    /// World X of the grid origin
    pub origin_x: f32,
    /// World Y of the grid origin
    pub origin_y: f32,
}

impl FrameHeader {
    /// Parse the header and isolate the compressed payload.
    ///
    /// The returned payload is exactly `compressed_size` bytes; anything after
    /// it in `raw` is ignored.
    pub fn parse(raw: &[u8]) -> Result<(FrameHeader, &[u8])> {
        if raw.len() < HEADER_SIZE {
            return Err(Error::Format(format!(
                "frame too short for header: {} bytes, need {}",
                raw.len(),
                HEADER_SIZE
            )));
        }

        let id = i16::from_le_bytes([raw[0], raw[1]]);
        let original_size = non_negative("original_size", read_i32(raw, 2))?;
        let compressed_size = non_negative("compressed_size", read_i32(raw, 6))?;
        let width = non_negative("width", read_i32(raw, 10))?;
        let height = non_negative("height", read_i32(raw, 14))?;

        let available = raw.len() - HEADER_SIZE;
        if compressed_size as usize > available {
            return Err(Error::Format(format!(
                "compressed_size {} exceeds the {} payload bytes present",
                compressed_size, available
            )));
        }

        let header = FrameHeader {
            id,
            original_size,
            compressed_size,
            width,
            height,
            resolution: read_f32(raw, 18),
            origin_x: read_f32(raw, 22),
            origin_y: read_f32(raw, 26),
        };

        let payload = &raw[HEADER_SIZE..HEADER_SIZE + compressed_size as usize];
        Ok((header, payload))
    }

    /// Serialize back to the 30-byte wire layout
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(&self.id.to_le_bytes());
        out[2..6].copy_from_slice(&(self.original_size as i32).to_le_bytes());
        out[6..10].copy_from_slice(&(self.compressed_size as i32).to_le_bytes());
        out[10..14].copy_from_slice(&(self.width as i32).to_le_bytes());
        out[14..18].copy_from_slice(&(self.height as i32).to_le_bytes());
        out[18..22].copy_from_slice(&self.resolution.to_le_bytes());
        out[22..26].copy_from_slice(&self.origin_x.to_le_bytes());
        out[26..30].copy_from_slice(&self.origin_y.to_le_bytes());
        out
    }

    /// Number of cells the header dimensions describe
    #[inline]
    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[inline]
fn read_i32(raw: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([raw[offset], raw[offset + 1], raw[offset + 2], raw[offset + 3]])
}

#[inline]
fn read_f32(raw: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([raw[offset], raw[offset + 1], raw[offset + 2], raw[offset + 3]])
}

fn non_negative(field: &str, value: i32) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::Format(format!("header field {} is negative: {}", field, value)))
}
