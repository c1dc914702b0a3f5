//! Map persistence in ROS-standard PGM+YAML format.
//!
//! This format is compatible with ROS Nav2 map_server.

mod export;
mod metadata;

pub use export::{ExportConfig, ExportedFiles, MapExporter, write_pgm, write_png};
pub use metadata::{DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, MapMetadata};
