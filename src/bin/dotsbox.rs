//! dotsbox CLI - Q-learning for Dots and Boxes over a symmetry-aware table
//!
//! This CLI provides a unified interface for:
//! - Training the Q-learner against fixed opponents
//! - Comparing saved tables and policies head to head
//! - Playing against a saved table

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dotsbox")]
#[command(version, about = "Dots and Boxes Q-learning toolkit", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the Q-learner
    Train(Box<dotsbox::cli::commands::train::TrainArgs>),

    /// Compare two agents head to head
    Compare(dotsbox::cli::commands::compare::CompareArgs),

    /// Play against a saved table
    Play(dotsbox::cli::commands::play::PlayArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format_timestamp_secs()
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => dotsbox::cli::commands::train::execute(*args),
        Commands::Compare(args) => dotsbox::cli::commands::compare::execute(args),
        Commands::Play(args) => dotsbox::cli::commands::play::execute(args),
    }
}
