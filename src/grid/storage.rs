//! Single-byte raster storage shared by every pipeline stage.

use crate::error::{Error, Result};

use super::coord::GridCoord;

/// `width x height` raster of one byte per cell, row-major.
///
/// Row 0 is the first row of the device's cell buffer; rasters are written
/// out in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl OccupancyGrid {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Fails with a format error when `pixels.len() != width * height`.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::Format(format!("grid dimensions overflow: {}x{}", width, height))
        })?;
        if pixels.len() != expected {
            return Err(Error::Format(format!(
                "cell buffer holds {} bytes but {}x{} needs {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.pixels.len()
    }

    /// Raw row-major pixels
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Check if grid coordinates are within bounds.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Convert grid coordinates to flat array index.
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates.
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Value at `coord`, `None` when out of bounds
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<u8> {
        self.coord_to_index(coord).map(|i| self.pixels[i])
    }

    /// Set the value at `coord`; returns false when out of bounds
    #[inline]
    pub fn set(&mut self, coord: GridCoord, value: u8) -> bool {
        if let Some(i) = self.coord_to_index(coord) {
            self.pixels[i] = value;
            true
        } else {
            false
        }
    }

    /// Number of cells holding exactly `value`
    pub fn count(&self, value: u8) -> usize {
        self.pixels.iter().filter(|&&p| p == value).count()
    }

    /// Coordinates of every cell holding `value`, row-major order
    pub fn coords_of(&self, value: u8) -> Vec<GridCoord> {
        self.pixels
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p == value)
            .map(|(i, _)| self.index_to_coord(i))
            .collect()
    }

    /// Boolean mask of cells holding `value`
    pub fn mask_of(&self, value: u8) -> Vec<bool> {
        self.pixels.iter().map(|&p| p == value).collect()
    }

    /// Sorted distinct pixel values present
    pub fn distinct_values(&self) -> Vec<u8> {
        let mut seen = [false; 256];
        for &p in &self.pixels {
            seen[p as usize] = true;
        }
        (0..=255u8).filter(|&v| seen[v as usize]).collect()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
