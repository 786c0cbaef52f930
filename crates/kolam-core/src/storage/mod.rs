//! Storage abstraction for saved kolams.
//!
//! The whiteboard only produces [`KolamRecord`]s; where they end up is the
//! business of a [`Storage`] backend.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::record::KolamRecord;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for record storage backends.
///
/// Implementations can keep records in memory, on the local filesystem, or
/// forward them to a remote library service. Callers drive the futures with
/// any executor; the shell uses `pollster`.
pub trait Storage: Send + Sync {
    /// Save a record under its id.
    fn save(&self, record: &KolamRecord) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a record.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<KolamRecord>>;

    /// Delete a record.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all record IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a record exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
