//! Raw device cell codes to canonical pixel classes.
//!
//! | Raw value | Flattened | Grayscale |
//! |-----------|-----------|-----------|
//! | `0xFE`, `0xFF` | 255 (unknown) | 255 (unknown) |
//! | `0xFD` | 0 (occupied) | 0 |
//! | `0x01..=0x09` | 128 (free) | `255 * (9 - v) / 8` |
//! | anything else | 128 (free) | 0 |

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::classes;
use super::storage::OccupancyGrid;

/// How explored cell codes are rendered
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    /// Collapse every explored code into one free class; `0xFD` is a wall.
    #[default]
    Flattened,
    /// Keep the device's room color codes as gray levels.
    Grayscale,
}

impl ColorPolicy {
    /// Classify one raw cell value
    #[inline]
    pub const fn classify(self, value: u8) -> u8 {
        if value >= 0xFE {
            return classes::UNKNOWN;
        }
        match self {
            ColorPolicy::Flattened => {
                if value == 0xFD {
                    classes::OCCUPIED
                } else {
                    classes::FREE
                }
            }
            ColorPolicy::Grayscale => {
                if value >= 0x01 && value <= 0x09 {
                    ((255 * (0x09 - value as u16)) / 8) as u8
                } else {
                    0
                }
            }
        }
    }

    /// Full 256-entry lookup table for this policy
    pub const fn lookup_table(self) -> [u8; 256] {
        let mut table = [0u8; 256];
        let mut v = 0;
        while v < 256 {
            table[v] = self.classify(v as u8);
            v += 1;
        }
        table
    }
}

/// Classify a decompressed cell buffer into a `width x height` grid.
///
/// Fails with a format error when the buffer length does not equal
/// `width * height`.
pub fn classify_cells(
    cells: &[u8],
    width: usize,
    height: usize,
    policy: ColorPolicy,
) -> Result<OccupancyGrid> {
    let table = policy.lookup_table();
    let pixels = cells.iter().map(|&c| table[c as usize]).collect();
    OccupancyGrid::from_raw(width, height, pixels)
}
