//! End-to-end decoding scenarios on synthetic frames.

mod common;

use common::*;
use naksha::frame::envelope::wrap_frame;
use naksha::grid::trinary;
use naksha::{
    ColorPolicy, ErrorKind, ExportConfig, FileSource, FrameSource, MapMetadata, MapPipeline,
    NakshaConfig, PipelineConfig, SegmentConfig,
};
use tempfile::TempDir;

fn seeded_config(min_border_cells: usize) -> PipelineConfig {
    PipelineConfig {
        segment: Some(SegmentConfig {
            min_border_cells,
            seed: Some(1234),
            ..SegmentConfig::default()
        }),
        ..PipelineConfig::default()
    }
}

#[test]
fn ring_room_decodes_to_trinary_map() {
    let canvas = ring_room_10x10();
    let pipeline = MapPipeline::new(seeded_config(20)).unwrap();

    let map = pipeline.decode(&canvas.frame()).unwrap();
    assert_eq!(map.report.border_cells_added, 0);

    for y in 0..10 {
        for x in 0..10 {
            let expected = match canvas.get(x, y) {
                RAW_WALL => trinary::OCCUPIED,
                RAW_ROOM => trinary::FREE,
                _ => trinary::UNKNOWN,
            };
            assert_eq!(map.grid.as_bytes()[y * 10 + x], expected, "cell ({}, {})", x, y);
        }
    }
    assert_eq!(map.grid.count(trinary::OCCUPIED), 20);
    assert_eq!(map.grid.count(trinary::FREE), 16);
    assert_eq!(map.grid.count(trinary::UNKNOWN), 64);
}

#[test]
fn ring_room_is_too_small_by_default() {
    let pipeline = MapPipeline::new(PipelineConfig::default()).unwrap();
    let err = pipeline.decode(&ring_room_10x10().frame()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
}

#[test]
fn open_room_gets_walls_then_segments() {
    let mut canvas = CellCanvas::new(60, 50);
    canvas.fill(10, 10, 45, 40, RAW_ROOM);

    let pipeline = MapPipeline::new(seeded_config(100)).unwrap();
    let map = pipeline.decode(&canvas.frame()).unwrap();

    // One-cell ring around a 36x31 room
    assert_eq!(map.report.border_cells_added, 2 * (38 + 33) - 4);
    assert_eq!(map.grid.count(trinary::FREE), 36 * 31);
    assert_eq!(map.grid.count(trinary::OCCUPIED), 138);
    assert_eq!(map.grid.distinct_values(), vec![0, 128, 255]);

    let seg = map.report.segment.as_ref().unwrap();
    assert_eq!(seg.border_cells, 138);
    assert_eq!(seg.unreached_cells, 0);
}

#[test]
fn decoded_grid_is_classified_before_border() {
    let mut canvas = CellCanvas::new(60, 50);
    canvas.fill(10, 10, 45, 40, RAW_ROOM);

    let pipeline = MapPipeline::new(seeded_config(100)).unwrap();
    let map = pipeline.decode(&canvas.frame()).unwrap();

    let decoded = map.decoded.as_ref().unwrap();
    assert_eq!(decoded.count(0), 0);
    assert_eq!(decoded.count(128), 36 * 31);
    assert_eq!(decoded.count(255), 60 * 50 - 36 * 31);
}

#[test]
fn truncated_payload_is_a_format_error() {
    let mut frame = ring_room_10x10().frame();
    frame.pop();

    let pipeline = MapPipeline::new(seeded_config(20)).unwrap();
    let err = pipeline.decode(&frame).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn corrupt_payload_is_a_decompression_error() {
    let cells = vec![RAW_UNKNOWN; 100];
    let payload = [0xF0u8, 0xFF, 0x01];
    let mut frame = header_for(&cells, 10, 10, payload.len() as u32)
        .to_bytes()
        .to_vec();
    frame.extend_from_slice(&payload);

    let pipeline = MapPipeline::new(seeded_config(20)).unwrap();
    let err = pipeline.decode(&frame).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decompression);
}

#[test]
fn dimension_mismatch_is_a_format_error() {
    let cells = ring_room_10x10().cells;
    // 100 cells declared as 12x9
    let frame = build_frame(&cells, 12, 9);

    let pipeline = MapPipeline::new(seeded_config(20)).unwrap();
    let err = pipeline.decode(&frame).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn grayscale_without_segmentation() {
    let mut canvas = CellCanvas::new(4, 1);
    canvas.cells = vec![0x01, 0x09, 0xFD, 0xFF];

    let config = PipelineConfig {
        color_policy: ColorPolicy::Grayscale,
        border: false,
        segment: None,
        ..PipelineConfig::default()
    };
    let pipeline = MapPipeline::new(config).unwrap();
    let map = pipeline.decode(&canvas.frame()).unwrap();
    assert_eq!(map.grid.as_bytes(), &[255, 0, 0, 255]);
    assert!(map.report.segment.is_none());
}

#[test]
fn grayscale_policy_from_config_decodes_room() {
    let mut canvas = CellCanvas::new(60, 50);
    canvas.fill(10, 10, 45, 40, RAW_ROOM);

    let config = NakshaConfig::from_toml("[decode]\ncolor_policy = \"grayscale\"").unwrap();
    let pipeline = MapPipeline::new(config.to_pipeline_config().unwrap()).unwrap();
    let map = pipeline.decode(&canvas.frame()).unwrap();

    assert!(map.report.segment.is_none());
    // Room code 0x05 renders as gray 127, never the 128 free class
    assert_eq!(map.report.border_cells_added, 0);
    assert_eq!(map.grid.count(127), 36 * 31);
    assert_eq!(map.grid.count(255), 60 * 50 - 36 * 31);
}

#[test]
fn zero_minimum_border_is_rejected_up_front() {
    let err = MapPipeline::new(seeded_config(0)).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn run_writes_rasters_and_sidecar() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        export: ExportConfig {
            output_dir: dir.path().join("maps"),
            map_name: "ring".to_string(),
            ..ExportConfig::default()
        },
        ..seeded_config(20)
    };
    let pipeline = MapPipeline::new(config).unwrap();

    let (map, files) = pipeline.run(&ring_room_10x10().frame()).unwrap();
    assert_eq!(files.paths().len(), 4);

    let pgm = std::fs::read(&files.pgm).unwrap();
    assert!(pgm.starts_with(b"P5\n10 10\n255\n"));
    assert_eq!(&pgm[pgm.len() - 100..], map.grid.as_bytes());

    let png = image::open(files.png.as_ref().unwrap()).unwrap().to_luma8();
    assert_eq!(png.as_raw().as_slice(), map.grid.as_bytes());

    let yaml = std::fs::read_to_string(&files.yaml).unwrap();
    let meta = MapMetadata::from_yaml(&yaml).unwrap();
    assert_eq!(meta.image, "ring.pgm");
    assert_eq!(meta.mode, "trinary");
    assert_eq!(meta.resolution, 0.05);
    assert_eq!(meta.origin, [-2.5, -1.25, 0.0]);
    assert!(yaml.contains("origin: [-2.5, -1.25, 0.0]\n"));
    assert!(yaml.ends_with("negate: 0\n"));
}

#[test]
fn saved_dump_through_file_source() {
    let dir = TempDir::new().unwrap();
    let frame = ring_room_10x10().frame();
    let mut source = FileSource::new(dir.path());
    std::fs::write(source.dump_path("4"), wrap_frame(&frame)).unwrap();

    let raw = source.fetch_frame("4").unwrap();
    assert_eq!(raw, frame);

    let map = MapPipeline::new(seeded_config(20))
        .unwrap()
        .decode(&raw)
        .unwrap();
    assert_eq!(map.header.width, 10);
    assert_eq!(map.grid.count(trinary::FREE), 16);
}
