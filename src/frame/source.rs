//! Frame acquisition.
//!
//! A [`FrameSource`] hands the pipeline a completed raw frame. Timeouts,
//! retries, and partial reads are the source's business, never the pipeline's.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::envelope::unwrap_frame;

/// Anything that can produce raw frame bytes for an identifier
pub trait FrameSource {
    /// Fetch the raw (unwrapped) frame for `identifier`
    fn fetch_frame(&mut self, identifier: &str) -> Result<Vec<u8>>;
}

/// Loads frames from map dumps on disk.
///
/// Identifiers resolve against `base_dir`: an existing path is used as is,
/// otherwise `active_map-<id>.txt` (the name the puller saves under) is tried.
#[derive(Debug, Clone)]
pub struct FileSource {
    base_dir: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Path a map id is saved under
    pub fn dump_path(&self, map_id: &str) -> PathBuf {
        self.base_dir.join(format!("active_map-{}.txt", map_id))
    }

    fn resolve(&self, identifier: &str) -> PathBuf {
        let direct = self.base_dir.join(identifier);
        if direct.exists() {
            direct
        } else {
            self.dump_path(identifier)
        }
    }
}

impl FrameSource for FileSource {
    fn fetch_frame(&mut self, identifier: &str) -> Result<Vec<u8>> {
        let path = self.resolve(identifier);
        let data = std::fs::read(&path)?;
        let (kind, raw) = unwrap_frame(&data)?;
        log::debug!(
            "Loaded {} ({:?} envelope, {} frame bytes)",
            path.display(),
            kind,
            raw.len()
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::frame::envelope::wrap_frame;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_by_file_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dump.txt"), wrap_frame(&[1, 2, 3])).unwrap();

        let mut source = FileSource::new(dir.path());
        assert_eq!(source.fetch_frame("dump.txt").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fetch_by_map_id() {
        let dir = TempDir::new().unwrap();
        let mut source = FileSource::new(dir.path());
        std::fs::write(source.dump_path("7"), "0a0b").unwrap();

        assert_eq!(source.fetch_frame("7").unwrap(), vec![0x0A, 0x0B]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut source = FileSource::new(dir.path());
        let err = source.fetch_frame("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
