//! Dots and Boxes rules

pub mod env;
pub mod render;

pub use env::{DotsAndBoxes, Player, StepInfo, StepResult};
