//! Export configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::io::ExportConfig;

use super::defaults;

/// Export settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportSection {
    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Base name for written files
    #[serde(default = "defaults::map_name")]
    pub map_name: String,

    /// Sidecar occupied threshold (0.0-1.0)
    #[serde(default = "defaults::occupied_thresh")]
    pub occupied_thresh: f32,

    /// Sidecar free threshold (0.0-1.0)
    #[serde(default = "defaults::free_thresh")]
    pub free_thresh: f32,

    /// Sidecar negate flag
    #[serde(default)]
    pub negate: bool,

    /// Multiplier for header resolution and origin
    #[serde(default = "defaults::unit_scale")]
    pub unit_scale: f32,

    /// Write a PNG copy of the final grid
    #[serde(default = "defaults::enabled")]
    pub write_png: bool,

    /// Write `<name>_decoded.pgm`
    #[serde(default = "defaults::enabled")]
    pub write_decoded: bool,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            map_name: defaults::map_name(),
            occupied_thresh: defaults::occupied_thresh(),
            free_thresh: defaults::free_thresh(),
            negate: false,
            unit_scale: 1.0,
            write_png: true,
            write_decoded: true,
        }
    }
}

impl ExportSection {
    /// Convert to ExportConfig
    pub fn to_export_config(&self) -> ExportConfig {
        ExportConfig {
            output_dir: PathBuf::from(&self.output_dir),
            map_name: self.map_name.clone(),
            occupied_thresh: self.occupied_thresh,
            free_thresh: self.free_thresh,
            negate: self.negate,
            unit_scale: self.unit_scale,
            write_png: self.write_png,
            write_decoded: self.write_decoded,
        }
    }
}
