//! Symmetry-aware Q-learning for Dots and Boxes
//!
//! This crate provides:
//! - A packed edge-occupancy board with its 8 square symmetries
//! - A value table keyed by canonical `(board, score, action)` triples, so a
//!   value learned for one position holds for all its rotations and mirrors
//! - The game rules, fixed policies and an epsilon-greedy Q-learner
//! - Training, comparison and persistence pipelines behind a CLI

pub mod adapters;
pub mod app;
pub mod board;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod policies;
pub mod ports;
pub mod q_learning;
pub mod utils;

pub use board::{Action, Board, Coordinate, D4Transform, Edge, EdgeEncoder, GameState, Rotator};
pub use error::{Error, Result};
pub use game::{DotsAndBoxes, Player};
pub use q_learning::{BoardSaver, EpsilonGreedyAgent};
