//! Integer cell coordinates.

/// Grid coordinates (integer cell indices, row-major raster)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Get the 4 cardinal neighbors (N, E, S, W)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y - 1), // North (previous row)
            GridCoord::new(self.x + 1, self.y), // East
            GridCoord::new(self.x, self.y + 1), // South
            GridCoord::new(self.x - 1, self.y), // West
        ]
    }

    /// Get the 8 neighbors (including diagonals)
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y - 1),
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x + 1, self.y + 1),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x - 1, self.y + 1),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x - 1, self.y - 1),
        ]
    }
}
