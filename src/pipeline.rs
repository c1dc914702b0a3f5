//! End-to-end frame decoding.
//!
//! ```text
//! raw frame -> FrameHeader::parse -> decompress_block -> classify_cells
//!           -> synthesize_border -> segment -> MapExporter
//! ```
//!
//! Each stage finishes before the next starts. Nothing is kept between
//! calls to [`MapPipeline::decode`].

use crate::error::Result;
use crate::frame::{FrameHeader, MAX_DECOMPRESSED_SIZE, decompress_block_with_limit};
use crate::grid::{
    ColorPolicy, OccupancyGrid, SegmentConfig, SegmentReport, classify_cells, segment,
    synthesize_border,
};
use crate::io::{ExportConfig, ExportedFiles, MapExporter, MapMetadata};

/// Stage settings for one pipeline
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Cell classification policy
    pub color_policy: ColorPolicy,
    /// Largest decompressed buffer accepted
    pub max_decompressed_size: usize,
    /// Run border synthesis
    pub border: bool,
    /// Segmentation settings; `None` skips segmentation
    pub segment: Option<SegmentConfig>,
    /// Output settings
    pub export: ExportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            color_policy: ColorPolicy::default(),
            max_decompressed_size: MAX_DECOMPRESSED_SIZE,
            border: true,
            segment: Some(SegmentConfig::default()),
            export: ExportConfig::default(),
        }
    }
}

/// What each stage did
#[derive(Clone, Debug, Default)]
pub struct PipelineReport {
    /// Compressed payload length
    pub compressed_bytes: usize,
    /// Decompressed cell buffer length
    pub decompressed_bytes: usize,
    /// Cells turned into walls by border synthesis
    pub border_cells_added: usize,
    /// Segmentation outcome, when it ran
    pub segment: Option<SegmentReport>,
}

/// Result of decoding one frame
#[derive(Clone, Debug)]
pub struct DecodedMap {
    /// Parsed header
    pub header: FrameHeader,
    /// Classified grid before border synthesis, when it will be exported
    pub decoded: Option<OccupancyGrid>,
    /// Final grid
    pub grid: OccupancyGrid,
    /// Sidecar contents
    pub metadata: MapMetadata,
    /// Stage summary
    pub report: PipelineReport,
}

/// Frame to occupancy map decoder
pub struct MapPipeline {
    config: PipelineConfig,
    exporter: MapExporter,
}

impl MapPipeline {
    /// Create a pipeline; fails when the segment or export settings are
    /// invalid
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if let Some(segment_config) = &config.segment {
            segment_config.validate()?;
        }
        let exporter = MapExporter::new(config.export.clone())?;
        Ok(Self { config, exporter })
    }

    /// Decode `raw` into a grid. Performs no I/O.
    pub fn decode(&self, raw: &[u8]) -> Result<DecodedMap> {
        let (header, payload) = FrameHeader::parse(raw)?;
        log::debug!(
            "Frame {}: {}x{} cells, {} -> {} bytes",
            header.id,
            header.width,
            header.height,
            header.compressed_size,
            header.original_size
        );

        let cells = decompress_block_with_limit(
            payload,
            header.original_size as usize,
            self.config.max_decompressed_size,
        )?;

        let mut grid = classify_cells(
            &cells,
            header.width as usize,
            header.height as usize,
            self.config.color_policy,
        )?;

        let decoded = self.config.export.write_decoded.then(|| grid.clone());

        let mut report = PipelineReport {
            compressed_bytes: payload.len(),
            decompressed_bytes: cells.len(),
            ..PipelineReport::default()
        };

        if self.config.border {
            report.border_cells_added = synthesize_border(&mut grid);
        }

        if let Some(segment_config) = &self.config.segment {
            report.segment = Some(segment(&mut grid, segment_config)?);
        }

        log::info!(
            "Decoded map {} ({}x{}), {} border cells added",
            header.id,
            header.width,
            header.height,
            report.border_cells_added
        );

        Ok(DecodedMap {
            metadata: self.exporter.metadata(&header),
            header,
            decoded,
            grid,
            report,
        })
    }

    /// Write a decoded map to the configured output directory
    pub fn export(&self, map: &DecodedMap) -> Result<ExportedFiles> {
        self.exporter
            .export(&map.grid, &map.metadata, map.decoded.as_ref())
    }

    /// Decode then export
    pub fn run(&self, raw: &[u8]) -> Result<(DecodedMap, ExportedFiles)> {
        let map = self.decode(raw)?;
        let files = self.export(&map)?;
        Ok((map, files))
    }
}
