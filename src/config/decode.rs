//! Decode and border configuration sections.

use serde::{Deserialize, Serialize};

use crate::grid::ColorPolicy;

use super::defaults;

/// Frame decoding settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecodeSection {
    /// Cell classification policy: "flattened" or "grayscale"
    #[serde(default)]
    pub color_policy: ColorPolicy,

    /// Largest decompressed cell buffer accepted (bytes)
    #[serde(default = "defaults::max_decompressed_size")]
    pub max_decompressed_size: usize,
}

impl Default for DecodeSection {
    fn default() -> Self {
        Self {
            color_policy: ColorPolicy::default(),
            max_decompressed_size: defaults::max_decompressed_size(),
        }
    }
}

/// Border synthesis settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BorderSection {
    /// Draw walls where explored space meets unknown space
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,
}

impl Default for BorderSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}
