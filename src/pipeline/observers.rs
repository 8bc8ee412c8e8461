//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    adapters::MsgPackRepository,
    game::Player,
    pipeline::{GameRecord, WindowReport},
    ports::{Observer, TableRepository},
    q_learning::BoardSaver,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, episode: usize, record: &GameRecord) -> Result<()> {
        match record.winner {
            Some(Player::One) => self.wins += 1,
            Some(Player::Two) => self.losses += 1,
            None => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Keeps the history of reporting windows
#[derive(Debug, Default)]
pub struct MetricsObserver {
    reports: Vec<WindowReport>,
    checkpoints: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[WindowReport] {
        &self.reports
    }

    /// Episodes at which a checkpoint was taken
    pub fn checkpoints(&self) -> &[usize] {
        &self.checkpoints
    }

    /// Highest window win rate so far
    pub fn best_win_rate(&self) -> Option<f64> {
        self.reports.iter().map(|r| r.win_rate).reduce(f64::max)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let windows = self.reports.len();
        let mean = |f: fn(&WindowReport) -> f64| {
            if windows == 0 {
                0.0
            } else {
                self.reports.iter().map(f).sum::<f64>() / windows as f64
            }
        };
        MetricsSummary {
            windows,
            checkpoints: self.checkpoints.len(),
            mean_win_rate: mean(|r| r.win_rate),
            mean_reward_rate: mean(|r| r.reward_rate),
            best_win_rate: self.best_win_rate().unwrap_or(0.0),
            last_win_rate: self.reports.last().map_or(0.0, |r| r.win_rate),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub windows: usize,
    pub checkpoints: usize,
    pub mean_win_rate: f64,
    pub mean_reward_rate: f64,
    pub best_win_rate: f64,
    pub last_win_rate: f64,
}

impl Observer for MetricsObserver {
    fn on_report(&mut self, report: &WindowReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn on_checkpoint(&mut self, episode: usize, _table: &BoardSaver) -> Result<()> {
        self.checkpoints.push(episode);
        Ok(())
    }
}

/// Checkpoint observer - Saves every promoted table
pub struct CheckpointObserver {
    directory: PathBuf,
    repository: Box<dyn TableRepository + Send>,
    saved: Vec<PathBuf>,
}

impl CheckpointObserver {
    /// Save checkpoints as MessagePack files under `directory`
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self::with_repository(directory, Box::new(MsgPackRepository::new()))
    }

    pub fn with_repository<P: AsRef<Path>>(
        directory: P,
        repository: Box<dyn TableRepository + Send>,
    ) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            repository,
            saved: Vec::new(),
        }
    }

    /// File name of the checkpoint taken at `episode`
    pub fn file_name(size: usize, episode: usize) -> String {
        format!("q_value_function_{size}x{size}_epoch{episode}.msgpack")
    }

    /// Paths written so far
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl Observer for CheckpointObserver {
    fn on_checkpoint(&mut self, episode: usize, table: &BoardSaver) -> Result<()> {
        let path = self
            .directory
            .join(Self::file_name(table.size(), episode));
        self.repository.save(table, &path)?;
        info!("saved checkpoint {}", path.display());
        self.saved.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn report(episode: usize, win_rate: f64) -> WindowReport {
        WindowReport {
            episode,
            games: 100,
            reward_rate: 0.0,
            win_rate,
            average_turns: 20.0,
            promoted: win_rate > 0.65,
        }
    }

    #[test]
    fn test_progress_counts_draws_apart_from_losses() {
        let mut progress = ProgressObserver::new();
        for (episode, winner) in [Some(Player::One), None, Some(Player::Two), None]
            .into_iter()
            .enumerate()
        {
            let record = GameRecord {
                reward: 0.0,
                won: winner == Some(Player::One),
                winner,
                turns: 12,
            };
            progress.on_game_end(episode + 1, &record).unwrap();
        }

        assert_eq!(progress.wins, 1);
        assert_eq!(progress.draws, 2);
        assert_eq!(progress.losses, 1);
        assert_eq!(progress.tally(), "1 D:2 L:1");
    }

    #[test]
    fn test_metrics_summary() {
        let mut metrics = MetricsObserver::new();
        assert_eq!(metrics.summary().windows, 0);

        metrics.on_report(&report(100, 0.5)).unwrap();
        metrics.on_report(&report(200, 0.7)).unwrap();
        metrics.on_checkpoint(200, &BoardSaver::new(2)).unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.windows, 2);
        assert_eq!(summary.checkpoints, 1);
        assert!((summary.mean_win_rate - 0.6).abs() < 1e-12);
        assert_eq!(summary.best_win_rate, 0.7);
        assert_eq!(summary.last_win_rate, 0.7);
        assert_eq!(metrics.checkpoints(), &[200]);
    }

    #[test]
    fn test_checkpoint_file_layout() {
        let dir = TempDir::new().unwrap();
        let mut observer = CheckpointObserver::new(dir.path());
        observer.on_checkpoint(300, &BoardSaver::new(3)).unwrap();

        let expected = dir.path().join("q_value_function_3x3_epoch300.msgpack");
        assert_eq!(observer.saved(), &[expected.clone()]);
        let loaded = MsgPackRepository::new().load(&expected).unwrap();
        assert_eq!(loaded.size(), 3);
    }
}
