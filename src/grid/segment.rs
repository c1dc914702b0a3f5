//! Frontier segmentation by seeded flood fill.
//!
//! After border synthesis every explored region is fenced by occupied cells.
//! A random border cell is sampled and a small window around it searched for
//! one free and one unknown cell. Those become the seeds for two 4-connected
//! tolerance fills: the interior fill is painted [`trinary::FREE`], the
//! exterior fill [`trinary::UNKNOWN`]. Walls are never repainted.
//!
//! Both fills read the same pre-fill snapshot, so painting one region cannot
//! change what the other reaches.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

use super::coord::GridCoord;
use super::storage::OccupancyGrid;
use super::{classes, trinary};

/// Segmentation tunables
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentConfig {
    /// Minimum occupied cells before segmentation is attempted
    pub min_border_cells: usize,
    /// Side length of the seed search window (cells)
    pub window_size: usize,
    /// Border samples tried before giving up
    pub max_seed_attempts: usize,
    /// Largest step between 4-neighbours a fill will cross
    pub fill_tolerance: u8,
    /// Fixed RNG seed; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            min_border_cells: 100,
            window_size: 10,
            max_seed_attempts: 1000,
            fill_tolerance: 5,
            seed: None,
        }
    }
}

impl SegmentConfig {
    /// Reject settings that leave nothing to sample or search
    pub fn validate(&self) -> Result<()> {
        if self.min_border_cells == 0 {
            return Err(Error::Config(
                "segment.min_border_cells must be at least 1".to_string(),
            ));
        }
        if self.window_size == 0 {
            return Err(Error::Config(
                "segment.window_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Interior and exterior fill seeds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedPair {
    /// First free cell in the window
    pub interior: GridCoord,
    /// First unknown cell in the window
    pub exterior: GridCoord,
}

/// Outcome of a segmentation run
#[derive(Clone, Debug)]
pub struct SegmentReport {
    /// Occupied cells found before filling
    pub border_cells: usize,
    /// Border samples drawn until a seed pair was found
    pub attempts: usize,
    /// Seeds used for the two fills
    pub seeds: SeedPair,
    /// Cells painted free
    pub interior_cells: usize,
    /// Cells painted unknown by the exterior fill
    pub exterior_cells: usize,
    /// Non-wall cells neither fill reached, painted unknown
    pub unreached_cells: usize,
}

/// Search the window centred on `center` for a seed pair.
///
/// The window is `window_size` cells on a side, clipped to the grid. Returns
/// the first free and first unknown cell in row-major order when both exist.
pub fn find_seed_pair(
    grid: &OccupancyGrid,
    center: GridCoord,
    window_size: usize,
) -> Option<SeedPair> {
    let half = (window_size / 2) as i32;
    let x0 = (center.x - half).max(0);
    let y0 = (center.y - half).max(0);
    let x1 = (center.x - half + window_size as i32).min(grid.width() as i32);
    let y1 = (center.y - half + window_size as i32).min(grid.height() as i32);

    let mut interior = None;
    let mut exterior = None;
    for y in y0..y1 {
        for x in x0..x1 {
            let coord = GridCoord::new(x, y);
            match grid.get(coord) {
                Some(classes::FREE) if interior.is_none() => interior = Some(coord),
                Some(classes::UNKNOWN) if exterior.is_none() => exterior = Some(coord),
                _ => {}
            }
        }
    }

    Some(SeedPair {
        interior: interior?,
        exterior: exterior?,
    })
}

/// Repaint `grid` into the trinary ROS convention.
///
/// Fails with a geometry error when there are no occupied cells or fewer
/// than `min_border_cells` of them, or when no sampled border window
/// yields a seed pair within `max_seed_attempts`.
pub fn segment(grid: &mut OccupancyGrid, config: &SegmentConfig) -> Result<SegmentReport> {
    let border = grid.coords_of(classes::OCCUPIED);
    if border.is_empty() || border.len() < config.min_border_cells {
        return Err(Error::Geometry(format!(
            "map too small: {} border cells, need at least {}",
            border.len(),
            config.min_border_cells
        )));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut found = None;
    for attempt in 1..=config.max_seed_attempts {
        let center = border[rng.random_range(0..border.len())];
        if let Some(pair) = find_seed_pair(grid, center, config.window_size) {
            found = Some((pair, attempt));
            break;
        }
    }
    let (seeds, attempts) = found.ok_or_else(|| {
        Error::Geometry(format!(
            "no valid seed region found after {} attempts",
            config.max_seed_attempts
        ))
    })?;
    log::debug!(
        "Seeds after {} attempt(s): interior ({}, {}), exterior ({}, {})",
        attempts,
        seeds.interior.x,
        seeds.interior.y,
        seeds.exterior.x,
        seeds.exterior.y
    );

    let inside = flood_region(grid, seeds.interior, config.fill_tolerance);
    let outside = flood_region(grid, seeds.exterior, config.fill_tolerance);

    let mut interior_cells = 0;
    let mut exterior_cells = 0;
    let mut unreached_cells = 0;
    for ((pixel, &is_inside), &is_outside) in grid.pixels_mut().iter_mut().zip(&inside).zip(&outside)
    {
        *pixel = if *pixel == classes::OCCUPIED {
            trinary::OCCUPIED
        } else if is_outside {
            exterior_cells += 1;
            trinary::UNKNOWN
        } else if is_inside {
            interior_cells += 1;
            trinary::FREE
        } else {
            unreached_cells += 1;
            trinary::UNKNOWN
        };
    }

    log::info!(
        "Segmented: {} free, {} unknown, {} unreached, {} walls",
        interior_cells,
        exterior_cells,
        unreached_cells,
        border.len()
    );

    Ok(SegmentReport {
        border_cells: border.len(),
        attempts,
        seeds,
        interior_cells,
        exterior_cells,
        unreached_cells,
    })
}

/// 4-connected floating-range fill over `grid` starting at `seed`.
///
/// A neighbour joins when its value is within `tolerance` of the cell it was
/// reached from. Occupied cells never join.
fn flood_region(grid: &OccupancyGrid, seed: GridCoord, tolerance: u8) -> Vec<bool> {
    let mut region = vec![false; grid.cell_count()];
    let Some(start) = grid.coord_to_index(seed) else {
        return region;
    };
    if grid.as_bytes()[start] == classes::OCCUPIED {
        return region;
    }

    let pixels = grid.as_bytes();
    let mut queue = VecDeque::new();
    region[start] = true;
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        let Some(ci) = grid.coord_to_index(current) else {
            continue;
        };
        let value = pixels[ci];

        for neighbor in current.neighbors_4() {
            let Some(ni) = grid.coord_to_index(neighbor) else {
                continue;
            };
            if region[ni] || pixels[ni] == classes::OCCUPIED {
                continue;
            }
            if pixels[ni].abs_diff(value) <= tolerance {
                region[ni] = true;
                queue.push_back(neighbor);
            }
        }
    }

    region
}
