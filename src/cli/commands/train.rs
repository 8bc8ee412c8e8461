//! Train command - Train the Q-learner against a fixed opponent

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use crate::{
    adapters::MsgPackRepository,
    app::AgentConfig,
    cli::{
        config::{OpponentKind, default_table_path, load_table},
        output::print_training_result,
    },
    game::DotsAndBoxes,
    pipeline::{CheckpointObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    ports::TableRepository,
    q_learning::{BoardSaver, EpsilonGreedyAgent, TableMetadata},
};

/// Where the JSON summary goes.
///
/// A directory (existing, or written with a trailing separator) receives
/// `training_summary_NxN.json`; any other path is forced to a `.json`
/// extension.
fn summary_path(raw: &Path, size: usize) -> PathBuf {
    let names_directory = raw.is_dir()
        || raw.file_name().is_none()
        || raw.to_string_lossy().ends_with(std::path::MAIN_SEPARATOR);
    if names_directory {
        return raw.join(format!("training_summary_{size}x{size}.json"));
    }

    let is_json = raw
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        raw.to_path_buf()
    } else {
        raw.with_extension("json")
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learner")]
pub struct TrainArgs {
    /// Boxes per side of the board
    #[arg(long, short = 'n', default_value_t = 3)]
    pub size: usize,

    /// Number of training games
    #[arg(long, short = 'e', default_value_t = 2_000)]
    pub episodes: usize,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Greedy)]
    pub opponent: OpponentKind,

    /// Table file, loaded when it exists and written after training
    /// (default: q_value_function_NxN.msgpack)
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// Directory for tables saved at promotions
    #[arg(long)]
    pub checkpoints: Option<PathBuf>,

    /// Games per reporting window
    #[arg(long, default_value_t = 100)]
    pub report_every: usize,

    /// Window win rate above which the opponent adopts the learner's table
    #[arg(long, default_value_t = 0.65)]
    pub promote_threshold: f64,

    #[arg(long, default_value_t = 0.05)]
    pub learning_rate: f64,

    #[arg(long, default_value_t = 0.1)]
    pub initial_epsilon: f64,

    /// Multiplicative epsilon decay per update
    #[arg(long, default_value_t = 0.999_995)]
    pub epsilon_decay: f64,

    #[arg(long, default_value_t = 0.01)]
    pub final_epsilon: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.95)]
    pub gamma: f64,

    /// Value of actions in unseen states (default: board size)
    #[arg(long)]
    pub initial_value: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    fn agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::default()
            .with_learning_rate(self.learning_rate)
            .with_initial_epsilon(self.initial_epsilon)
            .with_epsilon_decay(self.epsilon_decay)
            .with_final_epsilon(self.final_epsilon)
            .with_gamma(self.gamma);
        if let Some(value) = self.initial_value {
            config = config.with_initial_value(value);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            episodes: self.episodes,
            report_every: self.report_every,
            promote_threshold: self.promote_threshold,
            seed: self.seed,
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut env = DotsAndBoxes::new(args.size)?;
    let table_path = args
        .table
        .clone()
        .unwrap_or_else(|| default_table_path(args.size));

    let table = if table_path.exists() {
        let table = load_table(&table_path, args.size)?;
        info!(
            "continuing from {} ({} states)",
            table_path.display(),
            table.num_states()
        );
        table
    } else {
        info!("starting a new table at {}", table_path.display());
        BoardSaver::new(args.size)
    };

    let mut opponent = args
        .opponent
        .build(&table, args.seed.map(|s| s.wrapping_add(2)));
    let mut learner = EpsilonGreedyAgent::with_table(table, args.agent_config())
        .context("Invalid learner configuration")?;

    let mut pipeline = TrainingPipeline::new(args.training_config());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(dir) = &args.checkpoints {
        if dir.exists() && !dir.is_dir() {
            bail!("checkpoint path {} is not a directory", dir.display());
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        pipeline = pipeline.with_observer(Box::new(CheckpointObserver::new(dir)));
    }

    let result = pipeline.run(&mut env, &mut learner, opponent.as_mut())?;

    let metadata = TableMetadata {
        episodes: Some(result.episodes),
        opponent: Some(args.opponent.to_string()),
        seed: args.seed,
    };
    MsgPackRepository::new()
        .save_with_metadata(learner.table(), &metadata, &table_path)
        .with_context(|| format!("Failed to save table to {}", table_path.display()))?;
    println!("Saved table to {}", table_path.display());

    print_training_result(&result);

    if let Some(raw) = &args.summary {
        let path = summary_path(raw, args.size);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        result
            .save(&path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
