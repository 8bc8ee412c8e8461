//! MessagePack implementation of the table repository.
//!
//! This adapter implements the TableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_learning::{BoardSaver, SavedTable, TableMetadata},
};

/// MessagePack-based table repository.
///
/// Tables are written inside a versioned [`SavedTable`] envelope.
///
/// # Examples
///
/// ```no_run
/// use dotsbox::adapters::MsgPackRepository;
/// use dotsbox::ports::TableRepository;
/// use dotsbox::BoardSaver;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let table = BoardSaver::new(3);
///
/// // Save table
/// repo.save(&table, Path::new("trained.msgpack"))?;
///
/// // Load table
/// let loaded = repo.load(Path::new("trained.msgpack"))?;
/// # Ok::<(), dotsbox::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl TableRepository for MsgPackRepository {
    fn save_with_metadata(
        &self,
        table: &BoardSaver,
        metadata: &TableMetadata,
        path: &Path,
    ) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let saved = SavedTable::new(table, metadata.clone());
        rmp_serde::encode::write(&mut writer, &saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load_with_metadata(&self, path: &Path) -> Result<(BoardSaver, TableMetadata)> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedTable = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize table from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;

        saved.into_parts()
    }
}
