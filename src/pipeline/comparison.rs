//! Head-to-head evaluation of two agents

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{DotsAndBoxes, Player},
    pipeline::training::play_game,
    ports::Agent,
};

/// Outcome of a series of games, from agent one's point of view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub agent_one: String,
    pub agent_two: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
    /// Average reward per game
    pub average_reward: f64,
    pub average_turns: f64,
}

/// Play `games` games between two agents and tally the results.
///
/// Agents keep learning if they learn; pass frozen policies for a fair
/// evaluation.
pub fn compare<R: Rng + ?Sized>(
    env: &mut DotsAndBoxes,
    games: usize,
    agent_one: &mut dyn Agent,
    agent_two: &mut dyn Agent,
    rng: &mut R,
) -> Result<ComparisonResult> {
    info!(
        "start {} vs {} over {} games",
        agent_one.name(),
        agent_two.name(),
        games
    );

    let mut wins = 0;
    let mut losses = 0;
    let mut reward = 0.0;
    let mut turns = 0;
    for _ in 0..games {
        let record = play_game(env, &mut *agent_one, &mut *agent_two, rng)?;
        reward += record.reward;
        turns += record.turns;
        match record.winner {
            Some(Player::One) => wins += 1,
            Some(Player::Two) => losses += 1,
            None => {}
        }
    }

    let played = games.max(1) as f64;
    let result = ComparisonResult {
        agent_one: agent_one.name().to_string(),
        agent_two: agent_two.name().to_string(),
        games,
        wins,
        losses,
        draws: games - wins - losses,
        win_rate: wins as f64 / played,
        average_reward: reward / played,
        average_turns: turns as f64 / played,
    };
    info!(
        "[{}] won {:.2}% of the games with an average reward of {:.2} against [{}]",
        result.agent_one,
        result.win_rate * 100.0,
        result.average_reward,
        result.agent_two
    );
    Ok(result)
}
