//! Compare command - Pit two agents against each other

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{config::AgentSpec, output::print_comparison_result},
    game::DotsAndBoxes,
    pipeline::compare,
    utils::build_rng,
};

#[derive(Parser, Debug)]
#[command(about = "Compare two agents")]
pub struct CompareArgs {
    /// Player one (random, greedy, mixer:PATH, max-if-known:PATH or PATH)
    pub player_one: AgentSpec,

    /// Player two, same formats as player one
    pub player_two: AgentSpec,

    /// Boxes per side of the board
    #[arg(long, short = 'n', default_value_t = 3)]
    pub size: usize,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 1_000)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let mut env = DotsAndBoxes::new(args.size)?;
    let mut one = args
        .player_one
        .build(args.size, args.seed.map(|s| s.wrapping_add(1)))?;
    let mut two = args
        .player_two
        .build(args.size, args.seed.map(|s| s.wrapping_add(2)))?;
    let mut rng = build_rng(args.seed);

    println!(
        "Comparing {} (player 1) and {} (player 2) over {} games",
        one.name(),
        two.name(),
        args.games
    );
    let result = compare(&mut env, args.games, one.as_mut(), two.as_mut(), &mut rng)?;
    print_comparison_result(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positional_players() {
        let args = CompareArgs::parse_from(["compare", "greedy", "random", "-g", "5"]);
        assert_eq!(args.player_one, AgentSpec::Greedy);
        assert_eq!(args.player_two, AgentSpec::Random);
        assert_eq!(args.games, 5);
        execute(args).unwrap();
    }
}
