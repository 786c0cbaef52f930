//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::record::KolamRecord;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Storage that keeps records as JSON in memory.
///
/// Records are serialized on save and parsed on load, so anything that
/// would fail to round-trip through [`super::FileStorage`] fails here too,
/// without touching the disk. Ids are listed in sorted order.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Other("memory storage poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, record: &KolamRecord) -> BoxFuture<'_, StorageResult<()>> {
        let id = record.id.to_string();
        let json = record.to_json().map_err(|e| StorageError::Serialization(e.to_string()));
        Box::pin(async move {
            let json = json?;
            self.entries()?.insert(id, json);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<KolamRecord>> {
        let id = id.to_string();
        Box::pin(async move {
            let json = self.entries()?.get(&id).cloned().ok_or(StorageError::NotFound(id))?;
            KolamRecord::from_json(&json).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.entries()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.entries()?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.entries()?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::KolamMetadata;
    use crate::symmetry::SymmetryMode;
    use pollster::block_on;

    fn record(title: &str) -> KolamRecord {
        let png = [0x89, 0x50];
        KolamRecord::new(KolamMetadata::new(title), &png, (10, 10), 7, SymmetryMode::Both).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let record = record("Star");
        let id = record.id.to_string();

        block_on(storage.save(&record)).unwrap();
        assert_eq!(block_on(storage.load(&id)).unwrap(), record);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_resave_replaces() {
        let storage = MemoryStorage::new();
        let mut record = record("Draft");
        block_on(storage.save(&record)).unwrap();
        record.title = "Final".to_string();
        block_on(storage.save(&record)).unwrap();

        assert_eq!(storage.len(), 1);
        let loaded = block_on(storage.load(&record.id.to_string())).unwrap();
        assert_eq!(loaded.title, "Final");
    }

    #[test]
    fn test_list_is_sorted_and_delete() {
        let storage = MemoryStorage::new();
        let records: Vec<_> = ["One", "Two", "Three"].into_iter().map(record).collect();
        for record in &records {
            block_on(storage.save(record)).unwrap();
        }

        let mut expected: Vec<_> = records.iter().map(|r| r.id.to_string()).collect();
        expected.sort();
        assert_eq!(block_on(storage.list()).unwrap(), expected);

        block_on(storage.delete(&expected[0])).unwrap();
        assert!(!block_on(storage.exists(&expected[0])).unwrap());
        assert_eq!(storage.len(), 2);
        assert!(!storage.is_empty());
    }
}
