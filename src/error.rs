//! Error types for the dotsbox crate

use thiserror::Error;

use crate::board::{Coordinate, Edge};

/// Main error type for the dotsbox crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("coordinate {coordinate} is out of bounds for a board of size {size}")]
    OutOfBounds { coordinate: Coordinate, size: usize },

    #[error("invalid edge {first} -> {second}: {reason}")]
    InvalidEdge {
        first: Coordinate,
        second: Coordinate,
        reason: &'static str,
    },

    #[error("no value defined for action {action} with score {score}")]
    KeyNotFound { score: i32, action: Edge },

    #[error("edge {edge} has already been taken")]
    EdgeAlreadyTaken { edge: Edge },

    #[error("game already over")]
    GameOver,

    #[error("no actions available")]
    NoActionsAvailable,

    #[error("invalid board size {size} (must be at least 1)")]
    InvalidBoardSize { size: usize },

    #[error("board size mismatch: expected {expected}, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("cannot parse '{input}': {reason}")]
    ParseCoordinate { input: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported table format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
