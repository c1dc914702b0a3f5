//! Main NakshaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::device::LinkConfig;
use crate::error::{Error, Result};
use crate::grid::ColorPolicy;
use crate::pipeline::PipelineConfig;

use super::decode::{BorderSection, DecodeSection};
use super::device::DeviceSection;
use super::export::ExportSection;
use super::segment::SegmentSection;

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "configs/naksha.toml";

/// Full Naksha configuration loaded from TOML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct NakshaConfig {
    /// Frame decoding
    #[serde(default)]
    pub decode: DecodeSection,

    /// Border synthesis
    #[serde(default)]
    pub border: BorderSection,

    /// Segmentation
    #[serde(default)]
    pub segment: SegmentSection,

    /// Output files
    #[serde(default)]
    pub export: ExportSection,

    /// Serial link
    #[serde(default)]
    pub device: DeviceSection,
}

impl NakshaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Load from default config path (configs/naksha.toml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Convert to PipelineConfig
    ///
    /// Segmentation needs the flattened free class to seed its fills, so it
    /// is skipped under the grayscale policy.
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig> {
        let segment = if !self.segment.enabled {
            None
        } else if self.decode.color_policy == ColorPolicy::Grayscale {
            log::info!("Grayscale policy selected, skipping segmentation");
            None
        } else {
            Some(self.segment.to_segment_config()?)
        };

        Ok(PipelineConfig {
            color_policy: self.decode.color_policy,
            max_decompressed_size: self.decode.max_decompressed_size,
            border: self.border.enabled,
            segment,
            export: self.export.to_export_config(),
        })
    }

    /// Get the serial link config
    pub fn link_config(&self) -> LinkConfig {
        self.device.to_link_config()
    }
}
