//! Play command - A human against a trained table

use std::{
    io::{self, BufRead, BufReader, Stdin, Stdout, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    board::{Edge, GameState},
    cli::config::load_table,
    error::Error,
    game::{DotsAndBoxes, Player, render::render_board},
    pipeline::play_game,
    policies::MixerPolicy,
    ports::Agent,
    utils::build_rng,
};

/// An agent that asks for moves on a text stream
pub struct HumanAgent<R, W> {
    size: usize,
    input: R,
    output: W,
}

impl HumanAgent<BufReader<Stdin>, Stdout> {
    /// Read moves from stdin and draw the board on stdout
    pub fn stdio(size: usize) -> Self {
        Self::new(size, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(size: usize, input: R, output: W) -> Self {
        Self {
            size,
            input,
            output,
        }
    }

    fn io_error(operation: &str, source: io::Error) -> Error {
        Error::Io {
            operation: operation.to_string(),
            source,
        }
    }
}

impl<R, W> Agent for HumanAgent<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn select_action(&mut self, state: &GameState, actions: &[Edge]) -> crate::Result<Edge> {
        if actions.is_empty() {
            return Err(Error::NoActionsAvailable);
        }
        let board = render_board(self.size, &state.edges, |_, _| None);
        writeln!(self.output, "\n{board}\nyour boxes: {}", state.score)
            .map_err(|e| Self::io_error("write board", e))?;

        loop {
            write!(self.output, "give two adjacent nodes in the format \"0,0 0,1\": ")
                .and_then(|()| self.output.flush())
                .map_err(|e| Self::io_error("write prompt", e))?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| Self::io_error("read move", e))?;
            if read == 0 {
                return Err(Self::io_error(
                    "read move",
                    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"),
                ));
            }

            let written = match line.trim().parse::<Edge>() {
                Ok(edge) if actions.contains(&edge) => return Ok(edge),
                Ok(edge) => writeln!(self.output, "{edge} is not available"),
                Err(e) => writeln!(self.output, "{e}"),
            };
            written.map_err(|e| Self::io_error("write prompt", e))?;
        }
    }

    fn name(&self) -> &str {
        "human"
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play against a trained table")]
pub struct PlayArgs {
    /// Saved table the machine plays with
    pub table: PathBuf,

    /// Boxes per side of the board
    #[arg(long, short = 'n', default_value_t = 3)]
    pub size: usize,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let table = load_table(&args.table, args.size)?;
    let mut env = DotsAndBoxes::new(args.size)?;
    let mut machine = MixerPolicy::new(table, args.seed);
    let mut human = HumanAgent::stdio(args.size);
    let mut rng = build_rng(args.seed);

    for _ in 0..args.games {
        let record = play_game(&mut env, &mut human, &mut machine, &mut rng)?;
        println!("\n{env}");
        match env.winner() {
            Some(Player::One) => println!("You won in {} turns", record.turns),
            Some(Player::Two) => println!("The machine won in {} turns", record.turns),
            None => println!("Draw after {} turns", record.turns),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_human_retries_until_valid() {
        let input = Cursor::new(b"nonsense\n0,0 1,1\n0,0 0,1\n1,0 1,1\n".to_vec());
        let mut human = HumanAgent::new(1, input, Vec::new());
        let state = GameState::new(vec![Edge::new((0, 0), (0, 1))], 0);
        let actions = vec![
            Edge::new((0, 0), (1, 0)),
            Edge::new((0, 1), (1, 1)),
            Edge::new((1, 0), (1, 1)),
        ];

        let chosen = human.select_action(&state, &actions).unwrap();
        assert_eq!(chosen, Edge::new((1, 0), (1, 1)));

        let transcript = String::from_utf8(human.output).unwrap();
        assert!(transcript.contains("0,0 0,1 is not available"));
        assert!(transcript.contains("0,0 1,1 is not available"));
    }

    #[test]
    fn test_human_reports_closed_input() {
        let mut human = HumanAgent::new(1, Cursor::new(Vec::new()), Vec::new());
        let actions = vec![Edge::new((0, 0), (1, 0))];
        assert!(matches!(
            human.select_action(&GameState::default(), &actions),
            Err(Error::Io { .. })
        ));
    }
}
