//! Versioned save format for value tables.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::board_saver::BoardSaver,
};

/// Metadata about the training that produced a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Number of episodes trained
    pub episodes: Option<usize>,
    /// Opponent trained against
    pub opponent: Option<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
}

/// A table wrapped with its format version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTable {
    pub version: u32,
    pub size: usize,
    pub metadata: TableMetadata,
    table: BoardSaver,
}

impl SavedTable {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(table: &BoardSaver, metadata: TableMetadata) -> Self {
        Self {
            version: Self::VERSION,
            size: table.size(),
            metadata,
            table: table.clone(),
        }
    }

    /// Unwrap the table, checking version and size consistency.
    pub fn into_table(self) -> Result<BoardSaver> {
        self.into_parts().map(|(table, _)| table)
    }

    pub fn into_parts(self) -> Result<(BoardSaver, TableMetadata)> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        if self.size != self.table.size() {
            return Err(Error::SizeMismatch {
                expected: self.size,
                got: self.table.size(),
            });
        }
        Ok((self.table, self.metadata))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize table to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize table from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, Edge, GameState};

    #[test]
    fn test_roundtrip_keeps_values() {
        let mut table = BoardSaver::new(2);
        let state = GameState::new(vec![Edge::new((0, 1), (1, 1))], 1);
        let action = Action::between((0, 0), (1, 0));
        table.define(&state, action, 0.75).unwrap();

        let metadata = TableMetadata {
            episodes: Some(100),
            ..TableMetadata::default()
        };
        let bytes = SavedTable::new(&table, metadata.clone()).to_bytes().unwrap();
        let saved = SavedTable::from_bytes(&bytes).unwrap();
        assert_eq!(saved.metadata, metadata);

        let loaded = saved.into_table().unwrap();
        assert_eq!(loaded.get(&state, action).unwrap(), 0.75);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_rejects_other_versions() {
        let mut saved = SavedTable::new(&BoardSaver::new(2), TableMetadata::default());
        saved.version = 99;
        assert!(matches!(
            saved.into_table(),
            Err(Error::UnsupportedVersion {
                found: 99,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(SavedTable::from_bytes(&[0xc1, 0x00]).is_err());
    }
}
