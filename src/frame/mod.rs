//! Map frame decoding.
//!
//! - [`FrameHeader`]: fixed 30-byte little-endian header and payload split
//! - [`decompress_block`]: LZ4 raw block expansion with exact size check
//! - [`envelope`]: JSON / hex / binary wrappers used by the device and dumps
//! - [`FrameSource`]: collaborator interface for acquiring raw frames

mod decompress;
pub mod envelope;
mod header;
mod source;

pub use decompress::{MAX_DECOMPRESSED_SIZE, decompress_block, decompress_block_with_limit};
pub use header::{FrameHeader, HEADER_SIZE};
pub use source::{FileSource, FrameSource};

use std::fmt;

/// Header summary for diagnostics
#[derive(Debug, Clone)]
pub struct FrameInfo {
    /// Parsed header
    pub header: FrameHeader,
    /// Total raw frame length
    pub frame_len: usize,
}

impl FrameInfo {
    /// Parse just enough of `raw` to describe it
    pub fn inspect(raw: &[u8]) -> crate::Result<Self> {
        let (header, _) = FrameHeader::parse(raw)?;
        Ok(Self {
            header,
            frame_len: raw.len(),
        })
    }

    /// original / compressed size
    pub fn compression_ratio(&self) -> f64 {
        if self.header.compressed_size == 0 {
            return 1.0;
        }
        self.header.original_size as f64 / self.header.compressed_size as f64
    }

    /// Whether the declared dimensions agree with the declared cell buffer size
    pub fn dimensions_consistent(&self) -> bool {
        self.header.cell_count() == self.header.original_size as u64
    }
}

impl fmt::Display for FrameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(f, "ID: {}", h.id)?;
        writeln!(f, "Width: {}, Height: {}", h.width, h.height)?;
        writeln!(f, "Resolution: {}", h.resolution)?;
        writeln!(f, "Origin: ({}, {})", h.origin_x, h.origin_y)?;
        writeln!(f, "Original size: {} bytes", h.original_size)?;
        writeln!(
            f,
            "Compressed size: {} bytes (ratio {:.2}x)",
            h.compressed_size,
            self.compression_ratio()
        )?;
        write!(f, "Frame length: {} bytes", self.frame_len)
    }
}
