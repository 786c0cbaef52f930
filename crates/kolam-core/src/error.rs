//! Error types for the drawing engine.

use thiserror::Error;

/// Errors raised by the whiteboard engine.
///
/// Boundary conditions such as undo at the first entry are not errors;
/// those operations return `Ok(false)` instead.
#[derive(Debug, Error)]
pub enum KolamError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Snapshot encode failed: {0}")]
    SnapshotEncode(String),
    #[error("Snapshot decode failed: {0}")]
    SnapshotDecode(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type for engine operations.
pub type KolamResult<T> = Result<T, KolamError>;
