//! Subcommands of the `dotsbox` binary

pub mod compare;
pub mod play;
pub mod train;
