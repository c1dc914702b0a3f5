//! Segmentation configuration section.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::SegmentConfig;

use super::defaults;

/// Segmentation settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentSection {
    /// Run segmentation; off leaves the bordered grid as is
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Minimum occupied cells (walls) required
    #[serde(default = "defaults::min_border_cells")]
    pub min_border_cells: usize,

    /// Seed search window side (cells)
    #[serde(default = "defaults::window_size")]
    pub window_size: usize,

    /// Border samples before giving up
    #[serde(default = "defaults::max_seed_attempts")]
    pub max_seed_attempts: usize,

    /// Flood fill tolerance (gray levels)
    #[serde(default = "defaults::fill_tolerance")]
    pub fill_tolerance: u8,

    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SegmentSection {
    fn default() -> Self {
        Self {
            enabled: true,
            min_border_cells: 100,
            window_size: 10,
            max_seed_attempts: 1000,
            fill_tolerance: 5,
            seed: None,
        }
    }
}

impl SegmentSection {
    /// Convert to SegmentConfig; fails on zero minimum or window
    pub fn to_segment_config(&self) -> Result<SegmentConfig> {
        let config = SegmentConfig {
            min_border_cells: self.min_border_cells,
            window_size: self.window_size,
            max_seed_attempts: self.max_seed_attempts,
            fill_tolerance: self.fill_tolerance,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
