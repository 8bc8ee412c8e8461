//! Board encoding and symmetry handling for Dots and Boxes

pub mod action;
pub mod bitboard;
pub mod coordinate;
pub mod encoder;
pub mod rotator;
pub mod state;

pub use action::Action;
pub use bitboard::Board;
pub use coordinate::{Coordinate, Edge};
pub use encoder::EdgeEncoder;
pub use rotator::{D4Transform, Rotator, Symmetric, SymmetryImages};
pub use state::GameState;
