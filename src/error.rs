//! Error types for Naksha

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category, for callers that branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed frame, envelope, or grid dimensions
    Format,
    /// Corrupt payload or size mismatch after decompression
    Decompression,
    /// Map too small or no usable flood-fill seeds
    Geometry,
    /// File read or write failure
    Io,
    /// Serial link, timeout, or device protocol failure
    Transport,
    /// Unreadable or invalid configuration
    Config,
}

/// Naksha error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed header, payload/size inconsistency, dimension mismatch
    #[error("Format error: {0}")]
    Format(String),

    /// Corrupt LZ4 payload or decompressed size mismatch
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Map geometry unusable for segmentation
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing an exported map file failed
    #[error("Failed to write {}: {source}", path.display())]
    Export {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Device did not answer in time
    #[error("Communication timeout: {0}")]
    Timeout(String),

    /// Device protocol failure
    #[error("Device error: {0}")]
    Device(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format(_) => ErrorKind::Format,
            Error::Decompression(_) => ErrorKind::Decompression,
            Error::Geometry(_) => ErrorKind::Geometry,
            Error::Io(_) | Error::Export { .. } => ErrorKind::Io,
            Error::Serial(_) | Error::Timeout(_) | Error::Device(_) => ErrorKind::Transport,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}
