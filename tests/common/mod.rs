//! Synthetic frame builders shared by the integration tests.

#![allow(dead_code)]

use naksha::FrameHeader;

/// Unexplored cell code
pub const RAW_UNKNOWN: u8 = 0xFE;
/// Wall cell code
pub const RAW_WALL: u8 = 0xFD;
/// Explored room cell code
pub const RAW_ROOM: u8 = 0x05;

/// Row-major raw cell buffer builder
pub struct CellCanvas {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
}

impl CellCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![RAW_UNKNOWN; width * height],
        }
    }

    /// Fill the inclusive rectangle with `value`
    pub fn fill(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) -> &mut Self {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.cells[y * self.width + x] = value;
            }
        }
        self
    }

    /// Wall ring on the inclusive rectangle border, room cells inside
    pub fn room(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> &mut Self {
        self.fill(x0, y0, x1, y1, RAW_WALL);
        self.fill(x0 + 1, y0 + 1, x1 - 1, y1 - 1, RAW_ROOM)
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    pub fn frame(&self) -> Vec<u8> {
        build_frame(&self.cells, self.width as u32, self.height as u32)
    }
}

/// Header for `cells` compressed to `compressed_size` bytes
pub fn header_for(cells: &[u8], width: u32, height: u32, compressed_size: u32) -> FrameHeader {
    FrameHeader {
        id: 1,
        original_size: cells.len() as u32,
        compressed_size,
        width,
        height,
        resolution: 0.05,
        origin_x: -2.5,
        origin_y: -1.25,
    }
}

/// Compress `cells` into a complete frame
pub fn build_frame(cells: &[u8], width: u32, height: u32) -> Vec<u8> {
    let payload = lz4_flex::block::compress(cells);
    let header = header_for(cells, width, height, payload.len() as u32);
    let mut frame = header.to_bytes().to_vec();
    frame.extend_from_slice(&payload);
    frame
}

/// The 10x10 scenario: 0xFE background, 0xFD ring from (2,2) to (7,7), 4x4
/// room inside.
pub fn ring_room_10x10() -> CellCanvas {
    let mut canvas = CellCanvas::new(10, 10);
    canvas.room(2, 2, 7, 7);
    canvas
}
