//! Naksha - Hackerbot map frame decoder
//!
//! Turns the compressed occupancy map a Hackerbot base stores into a
//! ROS map_server compatible trinary grid (PGM + PNG + YAML sidecar).
//!
//! ## Pipeline
//!
//! | Stage | Module | Failure |
//! |-------|--------|---------|
//! | Parse 30-byte header | [`frame`] | [`ErrorKind::Format`] |
//! | LZ4 raw block expansion | [`frame`] | [`ErrorKind::Decompression`] |
//! | Classify cell codes | [`grid`] | [`ErrorKind::Format`] |
//! | Synthesize walls at the frontier | [`grid`] | - |
//! | Seeded flood-fill segmentation | [`grid`] | [`ErrorKind::Geometry`] |
//! | Write rasters and sidecar | [`io`] | [`ErrorKind::Io`] |
//!
//! Frames come from a [`FrameSource`]: a saved dump ([`FileSource`]) or the
//! base itself over serial ([`device::MapLink`]).
//!
//! ```rust,ignore
//! use naksha::{FileSource, FrameSource, MapPipeline, PipelineConfig};
//!
//! let raw = FileSource::new(".").fetch_frame("active_map-1.txt")?;
//! let pipeline = MapPipeline::new(PipelineConfig::default())?;
//! let (map, files) = pipeline.run(&raw)?;
//! ```
//!
//! ## Features
//!
//! - `mock`: Expose the scripted [`transport::MockTransport`] for hardware-free testing

pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod grid;
pub mod io;
pub mod pipeline;
pub mod transport;

// Re-export commonly used types
pub use config::NakshaConfig;
pub use error::{Error, ErrorKind, Result};
pub use frame::{FileSource, FrameHeader, FrameInfo, FrameSource};
pub use grid::{ColorPolicy, OccupancyGrid, SegmentConfig};
pub use io::{ExportConfig, MapMetadata};
pub use pipeline::{DecodedMap, MapPipeline, PipelineConfig, PipelineReport};
