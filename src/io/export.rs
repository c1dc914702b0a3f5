//! Raster and sidecar export.
//!
//! A map named `name` is written as:
//! - `{name}.pgm` - binary PGM (P5) trinary grid, referenced by the sidecar
//! - `{name}.png` - same grid as 8-bit grayscale PNG (optional)
//! - `{name}.yaml` - ROS map_server sidecar
//! - `{name}_decoded.pgm` - classified grid before border/segmentation (optional)
//!
//! Every file goes to a temporary file in the destination directory and is
//! renamed into place only once fully written.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::frame::FrameHeader;
use crate::grid::OccupancyGrid;

use super::metadata::{DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, MapMetadata};

/// Export settings
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Destination directory, created when missing
    pub output_dir: PathBuf,
    /// Base filename without extension
    pub map_name: String,
    /// Sidecar `occupied_thresh`
    pub occupied_thresh: f32,
    /// Sidecar `free_thresh`
    pub free_thresh: f32,
    /// Sidecar `negate`
    pub negate: bool,
    /// Multiplier applied to header resolution and origin
    pub unit_scale: f32,
    /// Also write a PNG copy of the final grid
    pub write_png: bool,
    /// Also write the classified grid before border synthesis
    pub write_decoded: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./maps"),
            map_name: "hackerbot_map".to_string(),
            occupied_thresh: DEFAULT_OCCUPIED_THRESH,
            free_thresh: DEFAULT_FREE_THRESH,
            negate: false,
            unit_scale: 1.0,
            write_png: true,
            write_decoded: true,
        }
    }
}

/// Paths written by one export
#[derive(Clone, Debug, Default)]
pub struct ExportedFiles {
    /// Final grid, PGM
    pub pgm: PathBuf,
    /// Final grid, PNG
    pub png: Option<PathBuf>,
    /// Sidecar
    pub yaml: PathBuf,
    /// Classified grid, PGM
    pub decoded: Option<PathBuf>,
}

impl ExportedFiles {
    /// All written paths in write order
    pub fn paths(&self) -> Vec<&Path> {
        let mut out = Vec::with_capacity(4);
        if let Some(decoded) = &self.decoded {
            out.push(decoded.as_path());
        }
        out.push(self.pgm.as_path());
        if let Some(png) = &self.png {
            out.push(png.as_path());
        }
        out.push(self.yaml.as_path());
        out
    }
}

/// Writes decoded maps to disk.
pub struct MapExporter {
    config: ExportConfig,
}

impl MapExporter {
    /// Create an exporter; fails when the map name is not a plain filename.
    pub fn new(config: ExportConfig) -> Result<Self> {
        let name = config.map_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::Config(format!(
                "map name must be a plain file name, got {:?}",
                name
            )));
        }
        Ok(Self { config })
    }

    fn path_for(&self, suffix: &str, ext: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}{}.{}", self.config.map_name, suffix, ext))
    }

    /// Sidecar metadata for `header`, referencing the PGM raster
    pub fn metadata(&self, header: &FrameHeader) -> MapMetadata {
        MapMetadata::from_header(
            header,
            format!("{}.pgm", self.config.map_name),
            self.config.occupied_thresh,
            self.config.free_thresh,
            self.config.negate,
            self.config.unit_scale,
        )
    }

    /// Write `grid` and its sidecar, plus `decoded` when enabled.
    ///
    /// A failure leaves earlier files in place and `grid` untouched.
    pub fn export(
        &self,
        grid: &OccupancyGrid,
        metadata: &MapMetadata,
        decoded: Option<&OccupancyGrid>,
    ) -> Result<ExportedFiles> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|source| Error::Export {
            path: dir.clone(),
            source,
        })?;

        let mut files = ExportedFiles::default();

        if self.config.write_decoded
            && let Some(decoded) = decoded
        {
            let path = self.path_for("_decoded", "pgm");
            write_pgm(&path, decoded)?;
            files.decoded = Some(path);
        }

        files.pgm = self.path_for("", "pgm");
        write_pgm(&files.pgm, grid)?;

        if self.config.write_png {
            let path = self.path_for("", "png");
            write_png(&path, grid)?;
            files.png = Some(path);
        }

        files.yaml = self.path_for("", "yaml");
        let yaml = metadata.to_yaml()?;
        write_atomic(&files.yaml, |w| w.write_all(yaml.as_bytes()))?;

        for path in files.paths() {
            log::info!("Wrote {}", path.display());
        }
        Ok(files)
    }
}

/// Write `grid` as binary PGM (P5).
pub fn write_pgm(path: &Path, grid: &OccupancyGrid) -> Result<()> {
    write_atomic(path, |w| {
        writeln!(w, "P5")?;
        writeln!(w, "{} {}", grid.width(), grid.height())?;
        writeln!(w, "255")?;
        w.write_all(grid.as_bytes())
    })
}

/// Write `grid` as single-channel 8-bit PNG.
pub fn write_png(path: &Path, grid: &OccupancyGrid) -> Result<()> {
    write_atomic(path, |w| {
        PngEncoder::new(w)
            .write_image(
                grid.as_bytes(),
                grid.width() as u32,
                grid.height() as u32,
                ExtendedColorType::L8,
            )
            .map_err(std::io::Error::other)
    })
}

/// Write through a temporary file in the destination directory, then rename.
fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let export_err = |source: std::io::Error| Error::Export {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(export_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer).map_err(export_err)?;
        writer.flush().map_err(export_err)?;
    }
    tmp.persist(path).map_err(|e| export_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn trinary_grid() -> OccupancyGrid {
        OccupancyGrid::from_raw(4, 2, vec![0, 128, 255, 128, 255, 255, 0, 128]).unwrap()
    }

    fn header() -> FrameHeader {
        FrameHeader {
            id: 1,
            original_size: 8,
            compressed_size: 8,
            width: 4,
            height: 2,
            resolution: 0.05,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    fn exporter(dir: &Path) -> MapExporter {
        MapExporter::new(ExportConfig {
            output_dir: dir.join("out"),
            map_name: "test_map".to_string(),
            ..ExportConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_pgm_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.pgm");
        write_pgm(&path, &trinary_grid()).unwrap();

        let bytes = fs::read(&path).unwrap();
        let mut expected = b"P5\n4 2\n255\n".to_vec();
        expected.extend_from_slice(trinary_grid().as_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_png_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.png");
        write_png(&path, &trinary_grid()).unwrap();

        let img = image::open(&path).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.as_raw().as_slice(), trinary_grid().as_bytes());
    }

    #[test]
    fn test_export_all_files() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(dir.path());
        let decoded = OccupancyGrid::new(4, 2, 128);
        let meta = exporter.metadata(&header());

        let files = exporter
            .export(&trinary_grid(), &meta, Some(&decoded))
            .unwrap();

        assert_eq!(files.paths().len(), 4);
        for path in files.paths() {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert!(files.yaml.ends_with("out/test_map.yaml"));
        assert!(
            files
                .decoded
                .as_ref()
                .is_some_and(|p| p.ends_with("test_map_decoded.pgm"))
        );

        let yaml = fs::read_to_string(&files.yaml).unwrap();
        assert!(yaml.starts_with("image: test_map.pgm\nmode: trinary\n"));

        // No temp files left behind
        let entries = fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(entries, 4);
    }

    #[test]
    fn test_export_optional_outputs_off() {
        let dir = TempDir::new().unwrap();
        let exporter = MapExporter::new(ExportConfig {
            output_dir: dir.path().to_path_buf(),
            write_png: false,
            write_decoded: false,
            ..ExportConfig::default()
        })
        .unwrap();
        let meta = exporter.metadata(&header());
        let decoded = OccupancyGrid::new(4, 2, 128);

        let files = exporter
            .export(&trinary_grid(), &meta, Some(&decoded))
            .unwrap();
        assert!(files.png.is_none());
        assert!(files.decoded.is_none());
        assert_eq!(files.paths().len(), 2);
    }

    #[test]
    fn test_export_failure_is_io_kind() {
        let dir = TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("out");
        fs::write(&blocker, b"not a directory").unwrap();

        let exporter = exporter(dir.path());
        let grid = trinary_grid();
        let meta = exporter.metadata(&header());
        let err = exporter.export(&grid, &meta, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(grid, trinary_grid());
    }

    #[test]
    fn test_sidecar_names_image_with_yaml_syntax() {
        let dir = TempDir::new().unwrap();
        for name in ["room #2", "lab: west", "[a]"] {
            let exporter = MapExporter::new(ExportConfig {
                output_dir: dir.path().to_path_buf(),
                map_name: name.to_string(),
                ..ExportConfig::default()
            })
            .unwrap();
            let meta = exporter.metadata(&header());
            let files = exporter.export(&trinary_grid(), &meta, None).unwrap();

            let yaml = fs::read_to_string(&files.yaml).unwrap();
            let parsed = MapMetadata::from_yaml(&yaml).unwrap();
            assert_eq!(parsed.image, format!("{}.pgm", name));
            assert!(files.pgm.ends_with(&parsed.image));
        }
    }

    #[test]
    fn test_rejects_path_like_names() {
        for name in ["", "a/b", "..", "x\\y"] {
            let config = ExportConfig {
                map_name: name.to_string(),
                ..ExportConfig::default()
            };
            let err = MapExporter::new(config).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::Config);
        }
    }
}
