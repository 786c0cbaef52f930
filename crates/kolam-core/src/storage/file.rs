//! File-based storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::record::KolamRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage.
///
/// Each record is written as `<id>.json`, with the drawing alongside it as
/// `<id>.png` so the library folder can be browsed directly.
#[derive(Debug)]
pub struct FileStorage {
    /// Base directory for record storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/kolam-studio/kolams/`
    /// On Windows: `%LOCALAPPDATA%\kolam-studio\kolams\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("kolam-studio").join("kolams"))
    }

    /// Sanitize an ID to be safe for filenames.
    fn file_stem(id: &str) -> String {
        id.chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", Self::file_stem(id)))
    }

    /// Path of the PNG written next to a record.
    pub fn image_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.png", Self::file_stem(id)))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, record: &KolamRecord) -> BoxFuture<'_, StorageResult<()>> {
        let id = record.id.to_string();
        let path = self.record_path(&id);
        let image_path = self.image_path(&id);
        let json = record.to_json().map_err(|e| StorageError::Serialization(e.to_string()));
        let png = record.image_png();

        Box::pin(async move {
            let json = json?;
            // The image goes first so a listed record always has its PNG.
            if let Some(png) = png {
                fs::write(&image_path, png).map_err(|e| {
                    StorageError::Io(format!("Failed to write {}: {}", image_path.display(), e))
                })?;
            }
            if let Err(e) = fs::write(&path, json) {
                let _ = fs::remove_file(&image_path);
                return Err(StorageError::Io(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                )));
            }
            log::info!("Saved kolam {} to {}", id, path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<KolamRecord>> {
        let path = self.record_path(id);
        let id_owned = id.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id_owned));
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            KolamRecord::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let paths = [self.record_path(id), self.image_path(id)];

        Box::pin(async move {
            for path in paths.iter().filter(|p| p.exists()) {
                fs::remove_file(path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let ids = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|e| e == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .collect();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.record_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}
