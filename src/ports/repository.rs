//! Repository port for value-table persistence.

use std::path::Path;

use crate::{
    Result,
    q_learning::{BoardSaver, TableMetadata},
};

/// Port for persisting and loading value tables.
///
/// # Examples
///
/// ```no_run
/// use dotsbox::{BoardSaver, adapters::MsgPackRepository, ports::TableRepository};
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let table = BoardSaver::new(3);
/// repo.save(&table, Path::new("q_value_function_3x3.msgpack"))?;
/// let loaded = repo.load(Path::new("q_value_function_3x3.msgpack"))?;
/// assert_eq!(loaded.size(), 3);
/// # Ok::<(), dotsbox::Error>(())
/// ```
pub trait TableRepository {
    /// Save a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, table: &BoardSaver, path: &Path) -> Result<()> {
        self.save_with_metadata(table, &TableMetadata::default(), path)
    }

    /// Save a table together with a description of how it was trained.
    fn save_with_metadata(
        &self,
        table: &BoardSaver,
        metadata: &TableMetadata,
        path: &Path,
    ) -> Result<()>;

    /// Load a table.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path`, the data is corrupt,
    /// or it was written in an unsupported format version.
    fn load(&self, path: &Path) -> Result<BoardSaver> {
        self.load_with_metadata(path).map(|(table, _)| table)
    }

    /// Load a table and the metadata it was saved with.
    fn load_with_metadata(&self, path: &Path) -> Result<(BoardSaver, TableMetadata)>;
}
