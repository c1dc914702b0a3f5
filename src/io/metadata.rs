//! ROS map_server sidecar metadata.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frame::FrameHeader;

/// Default occupancy threshold for ROS compatibility.
pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;

/// Default free threshold for ROS compatibility.
pub const DEFAULT_FREE_THRESH: f32 = 0.196;

/// Map metadata in ROS-standard YAML format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// Raster filename (relative to the YAML file).
    pub image: String,

    /// Interpretation mode; always `trinary` for segmented maps.
    pub mode: String,

    /// Map resolution per pixel.
    pub resolution: f32,

    /// Origin of map [x, y, yaw].
    pub origin: [f32; 3],

    /// Threshold for occupied cells (0.0-1.0).
    pub occupied_thresh: f32,

    /// Threshold for free cells (0.0-1.0).
    pub free_thresh: f32,

    /// Whether white means occupied (0 or 1).
    pub negate: u8,
}

impl MapMetadata {
    /// Build sidecar metadata from a frame header.
    ///
    /// `unit_scale` multiplies the device resolution and origin, for devices
    /// that report centimetres rather than metres.
    pub fn from_header(
        header: &FrameHeader,
        image: impl Into<String>,
        occupied_thresh: f32,
        free_thresh: f32,
        negate: bool,
        unit_scale: f32,
    ) -> Self {
        Self {
            image: image.into(),
            mode: "trinary".to_string(),
            resolution: header.resolution * unit_scale,
            origin: [header.origin_x * unit_scale, header.origin_y * unit_scale, 0.0],
            occupied_thresh,
            free_thresh,
            negate: negate as u8,
        }
    }

    /// Render the sidecar.
    ///
    /// Keys are emitted in map_server order with `origin` as an inline
    /// sequence. Every value goes through the YAML serializer, so names
    /// holding YAML syntax come out quoted.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(format!(
            "image: {}\n\
             mode: {}\n\
             resolution: {}\n\
             origin: [{}, {}, {}]\n\
             occupied_thresh: {}\n\
             free_thresh: {}\n\
             negate: {}\n",
            yaml_scalar(&self.image)?,
            yaml_scalar(&self.mode)?,
            yaml_scalar(&self.resolution)?,
            yaml_scalar(&self.origin[0])?,
            yaml_scalar(&self.origin[1])?,
            yaml_scalar(&self.origin[2])?,
            yaml_scalar(&self.occupied_thresh)?,
            yaml_scalar(&self.free_thresh)?,
            yaml_scalar(&self.negate)?,
        ))
    }

    /// Parse a sidecar.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Format(format!("Failed to parse map YAML: {}", e)))
    }
}

/// One YAML scalar, without the trailing newline
fn yaml_scalar<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .map_err(|e| Error::Format(format!("Failed to render map YAML: {}", e)))
}
