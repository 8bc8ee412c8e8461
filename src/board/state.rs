//! Game state as seen by the value table

use serde::{Deserialize, Serialize};

use super::coordinate::Edge;

/// The drawn edges plus a scalar score.
///
/// `score` is the box count of the player about to move. It is unaffected by
/// board symmetries and keys the table alongside the canonical board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameState {
    pub edges: Vec<Edge>,
    pub score: i32,
}

impl GameState {
    pub fn new(edges: Vec<Edge>, score: i32) -> Self {
        GameState { edges, score }
    }
}
