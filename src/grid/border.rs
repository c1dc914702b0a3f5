//! Occupied boundary synthesis.
//!
//! The device never records a wall at the edge of explored space. Every
//! unknown cell touching free space (8-connected) becomes occupied, giving
//! a one-cell boundary around each explored region.

use super::classes;
use super::coord::GridCoord;
use super::storage::OccupancyGrid;

/// 8-neighbour dilation of `mask`; out-of-bounds neighbours count as false.
pub fn dilate_8(mask: &[bool], width: usize, height: usize) -> Vec<bool> {
    let mut out = vec![false; mask.len()];
    for y in 0..height {
        for x in 0..width {
            if !mask[y * width + x] {
                continue;
            }
            for n in GridCoord::new(x as i32, y as i32).neighbors_8() {
                if n.x >= 0 && n.y >= 0 && (n.x as usize) < width && (n.y as usize) < height {
                    out[n.y as usize * width + n.x as usize] = true;
                }
            }
        }
    }
    out
}

/// Convert unknown cells bordering free space into occupied cells.
///
/// The neighbour mask is computed in full from the unmodified grid before
/// any cell is rewritten. Returns the number of cells converted.
pub fn synthesize_border(grid: &mut OccupancyGrid) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let free = grid.mask_of(classes::FREE);
    let near_free = dilate_8(&free, width, height);

    let mut added = 0;
    for (pixel, &touches) in grid.pixels_mut().iter_mut().zip(&near_free) {
        if touches && *pixel == classes::UNKNOWN {
            *pixel = classes::OCCUPIED;
            added += 1;
        }
    }

    log::debug!("Border synthesis added {} occupied cells", added);
    added
}
