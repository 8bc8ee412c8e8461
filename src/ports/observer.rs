//! Observer port - abstraction for training observation and data collection

use crate::{
    Result,
    pipeline::{GameRecord, WindowReport},
    q_learning::BoardSaver,
};

/// Observer trait for monitoring training
///
/// The methods are called in the following order:
/// 1. `on_training_start(total_episodes)` once
/// 2. `on_game_end(episode, record)` after every game, with
///    `on_report(report)` at the end of each reporting window and
///    `on_checkpoint(episode, table)` when the window met the promotion
///    threshold
/// 3. `on_training_end()` once
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _episode: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called with the statistics of a finished reporting window.
    fn on_report(&mut self, _report: &WindowReport) -> Result<()> {
        Ok(())
    }

    /// Called when the learner's table was good enough to be promoted.
    fn on_checkpoint(&mut self, _episode: usize, _table: &BoardSaver) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
