//! In-memory table repository for testing.
//!
//! This adapter provides a pure in-memory implementation of TableRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_learning::{BoardSaver, SavedTable, TableMetadata},
};

/// In-memory repository for testing.
///
/// Stores the same MessagePack bytes the file repository would write, keyed
/// by path, in a shared HashMap.
///
/// # Examples
///
/// ```
/// use dotsbox::adapters::InMemoryRepository;
/// use dotsbox::ports::TableRepository;
/// use dotsbox::BoardSaver;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let table = BoardSaver::new(2);
///
/// // Save to "memory" (not disk)
/// repo.save(&table, Path::new("table"))?;
///
/// // Load from "memory"
/// let loaded = repo.load(Path::new("table"))?;
/// assert_eq!(loaded.size(), 2);
/// # Ok::<(), dotsbox::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored tables.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a table exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableRepository for InMemoryRepository {
    fn save_with_metadata(
        &self,
        table: &BoardSaver,
        metadata: &TableMetadata,
        path: &Path,
    ) -> Result<()> {
        let bytes = SavedTable::new(table, metadata.clone()).to_bytes()?;
        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load_with_metadata(&self, path: &Path) -> Result<(BoardSaver, TableMetadata)> {
        let storage = self.storage();
        let bytes = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load table from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        SavedTable::from_bytes(bytes)?.into_parts()
    }
}
