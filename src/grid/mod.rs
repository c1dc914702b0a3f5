//! Occupancy raster and the in-place grid stages.
//!
//! | Stage | Entry point | Effect |
//! |-------|-------------|--------|
//! | Classify | [`classify_cells`] | raw device codes to pixel classes |
//! | Border | [`synthesize_border`] | unknown cells touching free space become walls |
//! | Segment | [`segment`] | seeded flood fills produce the trinary ROS grid |
//!
//! Two pixel vocabularies are in play. Classification and border synthesis
//! work in [`classes`] (free is mid-gray). Segmentation repaints into
//! [`trinary`], the ROS map_server convention where free is white.

mod border;
mod classify;
mod coord;
mod segment;
mod storage;

pub use border::{dilate_8, synthesize_border};
pub use classify::{ColorPolicy, classify_cells};
pub use coord::GridCoord;
pub use segment::{SegmentConfig, SegmentReport, SeedPair, find_seed_pair, segment};
pub use storage::OccupancyGrid;

/// Pixel classes produced by the classifier.
pub mod classes {
    /// Wall or obstacle
    pub const OCCUPIED: u8 = 0;
    /// Explored, traversable
    pub const FREE: u8 = 128;
    /// Never observed
    pub const UNKNOWN: u8 = 255;
}

/// Final pixel values after segmentation.
pub mod trinary {
    /// Wall or obstacle
    pub const OCCUPIED: u8 = 0;
    /// Outside the explored frontier
    pub const UNKNOWN: u8 = 128;
    /// Inside the explored frontier
    pub const FREE: u8 = 255;
}
