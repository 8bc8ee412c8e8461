//! Ports (trait boundaries) for external dependencies.
//!
//! The training pipeline talks to players, observers and table storage only
//! through these traits; concrete implementations live in `policies`,
//! `q_learning`, `pipeline::observers` and `adapters`.

pub mod agent;
pub mod observer;
pub mod repository;

pub use agent::{Agent, Transition};
pub use observer::Observer;
pub use repository::TableRepository;
