//! Unified configuration loading for Naksha.
//!
//! Loads all configuration from a single TOML file with sensible defaults.
//! Every field is optional; a missing file or an empty one yields the
//! defaults below.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use naksha::config::NakshaConfig;
//!
//! // Load from default path (configs/naksha.toml)
//! let config = NakshaConfig::load_default()?;
//!
//! let pipeline = naksha::MapPipeline::new(config.to_pipeline_config()?)?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`DecodeSection`] | Color policy, decompression limit |
//! | [`BorderSection`] | Border synthesis toggle |
//! | [`SegmentSection`] | Seed search and flood fill |
//! | [`ExportSection`] | Output directory, file names, sidecar values |
//! | [`DeviceSection`] | Serial port and timeouts |
//!
//! ## Example TOML
//!
//! ```toml
//! [decode]
//! color_policy = "flattened"   # or "grayscale"
//!
//! [segment]
//! min_border_cells = 100
//! window_size = 10
//! fill_tolerance = 5
//! seed = 42                    # omit for a random seed
//!
//! [export]
//! output_dir = "./maps"
//! map_name = "hackerbot_map"
//! occupied_thresh = 0.65
//! free_thresh = 0.196
//!
//! [device]
//! port = "/dev/ttyACM0"
//! baud_rate = 230400
//! ```

mod decode;
mod defaults;
mod device;
mod export;
mod naksha;
mod segment;

// Re-export main types
pub use naksha::{DEFAULT_CONFIG_PATH, NakshaConfig};

// Re-export section types
pub use decode::{BorderSection, DecodeSection};
pub use device::DeviceSection;
pub use export::ExportSection;
pub use segment::SegmentSection;
