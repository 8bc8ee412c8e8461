//! Training and evaluation pipeline
//!
//! This module provides:
//! - Self-contained games between any two agents
//! - Training the Q-learner against an opponent that adopts its table
//! - Comparing two agents head to head
//! - Recording observations during training

pub mod comparison;
pub mod observers;
pub mod training;

pub use comparison::{ComparisonResult, compare};
pub use observers::{CheckpointObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{
    GameRecord, TrainingConfig, TrainingPipeline, TrainingResult, WindowReport, play_game,
};

pub use crate::ports::{Agent, Observer};
