//! The local kolam library and PNG export files.

use crate::error::{AppError, AppResult};
use kolam_core::{FileStorage, KolamMetadata, KolamRecord, MemoryStorage, Storage, Whiteboard};
use pollster::block_on;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Saved kolams, backed by any [`Storage`].
pub struct Library {
    storage: Box<dyn Storage>,
}

impl Library {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Open the file library at `path`, or at the platform data directory.
    pub fn open(path: Option<PathBuf>) -> AppResult<Self> {
        let storage = match path {
            Some(path) => FileStorage::new(path)?,
            None => FileStorage::default_location()?,
        };
        log::debug!("Using kolam library at {}", storage.base_path().display());
        Ok(Self::new(storage))
    }

    /// A library that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Save the current drawing with the given metadata.
    pub fn save(
        &self,
        whiteboard: &Whiteboard,
        metadata: KolamMetadata,
    ) -> AppResult<KolamRecord> {
        let record = whiteboard.to_record(metadata)?;
        block_on(self.storage.save(&record))?;
        Ok(record)
    }

    pub fn load(&self, id: &str) -> AppResult<KolamRecord> {
        Ok(block_on(self.storage.load(id))?)
    }

    /// All saved records, oldest first.
    pub fn records(&self) -> AppResult<Vec<KolamRecord>> {
        let mut records = block_on(self.storage.list())?
            .iter()
            .map(|id| self.load(id))
            .collect::<AppResult<Vec<_>>>()?;
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(records)
    }

    /// Delete a record. Returns false if it didn't exist.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        if !block_on(self.storage.exists(id))? {
            return Ok(false);
        }
        block_on(self.storage.delete(id))?;
        Ok(true)
    }
}

/// Write the whiteboard's PNG export to `path`. Returns the number of bytes written.
pub fn write_png(whiteboard: &Whiteboard, path: &Path) -> AppResult<usize> {
    let png = whiteboard.export_png()?;
    std::fs::write(path, &png).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Exported {} bytes to {}", png.len(), path.display());
    Ok(png.len())
}

/// Parse a region, difficulty or occasion label case-insensitively.
pub fn parse_label<T: DeserializeOwned>(label: &str) -> Result<T, String> {
    let mut chars = label.trim().chars();
    let normalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("unknown value {:?}", label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Action, Script};
    use kolam_core::{Occasion, Region, SymmetryMode, ToolUpdate};
    use tempfile::tempdir;

    fn drawn() -> Whiteboard {
        Script {
            container_width: 200.0,
            actions: vec![
                Action::Tools(ToolUpdate {
                    symmetry_mode: Some("radial-8".to_string()),
                    ..Default::default()
                }),
                Action::Stroke { points: vec![[20.0, 30.0], [80.0, 60.0]] },
            ],
            ..Script::default()
        }
        .replay()
        .unwrap()
    }

    #[test]
    fn test_save_and_list() {
        let library = Library::in_memory();
        let whiteboard = drawn();

        let saved = library.save(&whiteboard, KolamMetadata::new("Star")).unwrap();
        assert_eq!(saved.symmetry, SymmetryMode::Radial8);

        let records = library.records().unwrap();
        assert_eq!(records, vec![saved.clone()]);
        assert_eq!(library.load(&saved.id.to_string()).unwrap(), saved);
    }

    #[test]
    fn test_invalid_metadata_is_not_saved() {
        let library = Library::in_memory();
        let result = library.save(&drawn(), KolamMetadata::new("   "));
        assert!(matches!(result, Err(AppError::Kolam(_))));
        assert!(library.records().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let library = Library::in_memory();
        let saved = library.save(&drawn(), KolamMetadata::new("Lamp")).unwrap();
        let id = saved.id.to_string();

        assert!(library.delete(&id).unwrap());
        assert!(!library.delete(&id).unwrap());
        assert!(matches!(library.load(&id), Err(AppError::Storage(_))));
    }

    #[test]
    fn test_file_library_and_png() {
        let dir = tempdir().unwrap();
        let library = Library::open(Some(dir.path().join("kolams"))).unwrap();
        let whiteboard = drawn();
        library.save(&whiteboard, KolamMetadata::new("Diya")).unwrap();
        assert_eq!(library.records().unwrap().len(), 1);

        let path = dir.path().join("out.png");
        let written = write_png(&whiteboard, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), written);
        assert_eq!(bytes, whiteboard.export_png().unwrap());
    }

    #[test]
    fn test_in_memory_library_round_trips_image() {
        let library = Library::in_memory();
        let whiteboard = drawn();
        let saved = library.save(&whiteboard, KolamMetadata::new("Kolam")).unwrap();

        let loaded = library.load(&saved.id.to_string()).unwrap();
        assert_eq!(loaded.image_png().unwrap(), whiteboard.export_png().unwrap());
        assert_eq!(library.records().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label::<Region>("malayalam"), Ok(Region::Malayalam));
        assert_eq!(parse_label::<Occasion>("PONGAL"), Ok(Occasion::Pongal));
        assert!(parse_label::<Region>("Marathi").is_err());
        assert!(parse_label::<Region>("").is_err());
    }
}
