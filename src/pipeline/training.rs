//! Training pipeline for the Q-learner

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{DotsAndBoxes, Player},
    ports::{Agent, Observer, Transition},
    q_learning::EpsilonGreedyAgent,
    utils::build_rng,
};

/// Outcome of one game from player one's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sum of the rewards of player one's moves
    pub reward: f64,
    /// Whether player one ended with more boxes
    pub won: bool,
    /// Player with more boxes, `None` on a tie
    pub winner: Option<Player>,
    /// Moves made by both players
    pub turns: usize,
}

/// Play one game, feeding every move's transition to the agent that made it.
///
/// `agent_one` plays [`Player::One`]; the starting player is drawn from `rng`.
pub fn play_game<R: Rng + ?Sized>(
    env: &mut DotsAndBoxes,
    agent_one: &mut dyn Agent,
    agent_two: &mut dyn Agent,
    rng: &mut R,
) -> Result<GameRecord> {
    let mut state = env.reset(rng);
    let mut reward = 0.0;
    let mut turns = 0;

    while !env.is_done() {
        let mover = env.turn();
        let agent: &mut dyn Agent = match mover {
            Player::One => &mut *agent_one,
            Player::Two => &mut *agent_two,
        };

        let actions = env.available_actions();
        let action = agent.select_action(&state, &actions)?;
        let result = env.step(action)?;
        let next_actions = env.available_actions();
        agent.observe(&Transition {
            state: &state,
            action,
            reward: result.reward,
            done: result.done,
            next_state: &result.state,
            next_actions: &next_actions,
        })?;

        turns += 1;
        if mover == Player::One {
            reward += result.reward;
        }
        state = result.state;
    }

    Ok(GameRecord {
        reward,
        won: env.winner() == Some(Player::One),
        winner: env.winner(),
        turns,
    })
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub episodes: usize,

    /// Games per reporting window
    pub report_every: usize,

    /// Window win rate above which the opponent adopts the learner's table
    pub promote_threshold: f64,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 2_000,
            report_every: 100,
            promote_threshold: 0.65,
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.report_every == 0 {
            return Err(Error::InvalidConfiguration {
                message: "report_every must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.promote_threshold) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "promote_threshold must be within [0, 1], got {}",
                    self.promote_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Statistics of one reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    /// Episodes completed when the window closed
    pub episode: usize,
    /// Games in the window
    pub games: usize,
    /// Average reward per game
    pub reward_rate: f64,
    pub win_rate: f64,
    pub average_turns: f64,
    /// Whether the opponent adopted the learner's table
    pub promoted: bool,
}

#[derive(Debug, Default)]
struct Window {
    games: usize,
    reward: f64,
    wins: usize,
    turns: usize,
}

impl Window {
    fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        self.reward += record.reward;
        self.wins += usize::from(record.won);
        self.turns += record.turns;
    }

    fn report(&self, episode: usize, threshold: f64) -> WindowReport {
        let games = self.games.max(1) as f64;
        let win_rate = self.wins as f64 / games;
        WindowReport {
            episode,
            games: self.games,
            reward_rate: self.reward / games,
            win_rate,
            average_turns: self.turns as f64 / games,
            promoted: win_rate > threshold,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub episodes: usize,

    /// Games won by the learner
    pub wins: usize,

    pub win_rate: f64,

    /// Average reward per game
    pub average_reward: f64,

    pub average_turns: f64,

    /// Episodes at which the opponent adopted the learner's table
    pub promotions: Vec<usize>,

    /// Exploration rate when training stopped
    pub final_epsilon: f64,

    /// `(board, score)` states in the learner's table
    pub states_learned: usize,

    pub reports: Vec<WindowReport>,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for the learner (player one) against a fixed opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `learner` for the configured number of episodes.
    ///
    /// At the end of every reporting window whose win rate exceeds the
    /// promotion threshold, the opponent adopts a snapshot of the learner's
    /// table and observers get a checkpoint.
    pub fn run(
        &mut self,
        env: &mut DotsAndBoxes,
        learner: &mut EpsilonGreedyAgent,
        opponent: &mut dyn Agent,
    ) -> Result<TrainingResult> {
        self.config.validate()?;
        if learner.table().size() != env.size() {
            return Err(Error::SizeMismatch {
                expected: env.size(),
                got: learner.table().size(),
            });
        }

        let mut rng = build_rng(self.config.seed);
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed.wrapping_add(1))?;
            opponent.set_rng_seed(seed.wrapping_add(2))?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }
        info!(
            "training {} against {} for {} episodes on a {}x{} board",
            learner.name(),
            opponent.name(),
            self.config.episodes,
            env.size(),
            env.size()
        );

        let mut total = Window::default();
        let mut window = Window::default();
        let mut promotions = Vec::new();
        let mut reports = Vec::new();

        for episode in 1..=self.config.episodes {
            let record = play_game(env, &mut *learner, &mut *opponent, &mut rng)?;
            total.record(&record);
            window.record(&record);

            for observer in &mut self.observers {
                observer.on_game_end(episode, &record)?;
            }

            if episode % self.config.report_every != 0 {
                continue;
            }

            let report = window.report(episode, self.config.promote_threshold);
            info!(
                "episode: {}, reward rate: {:.2}, won: {:.2}%, avg turns: {:.2}",
                episode,
                report.reward_rate,
                report.win_rate * 100.0,
                report.average_turns
            );
            debug!(
                "epsilon {:.5}, {} states learned",
                learner.epsilon(),
                learner.table().num_states()
            );

            if report.promoted {
                info!(
                    "promoting learner table at episode {} ({:.2}% won)",
                    episode,
                    report.win_rate * 100.0
                );
                opponent.refresh_table(learner.table())?;
                promotions.push(episode);
                for observer in &mut self.observers {
                    observer.on_checkpoint(episode, learner.table())?;
                }
            }

            for observer in &mut self.observers {
                observer.on_report(&report)?;
            }
            reports.push(report);
            window = Window::default();
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let summary = total.report(self.config.episodes, self.config.promote_threshold);
        info!(
            "finished training: {} episodes, {:.2}% won",
            total.games,
            summary.win_rate * 100.0
        );

        Ok(TrainingResult {
            episodes: total.games,
            wins: total.wins,
            win_rate: summary.win_rate,
            average_reward: summary.reward_rate,
            average_turns: summary.average_turns,
            promotions,
            final_epsilon: learner.epsilon(),
            states_learned: learner.table().num_states(),
            reports,
        })
    }
}
