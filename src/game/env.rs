//! Game environment: turn order, box capture and termination

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Edge, GameState},
    error::{Error, Result},
};

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Bookkeeping returned with every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub player_one_points: usize,
    pub player_two_points: usize,
    pub new_player_one_points: usize,
    pub new_player_two_points: usize,
    /// Player to move next
    pub player_turn: Player,
}

/// Result of drawing one edge
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Observation after the move
    pub state: GameState,
    /// Reward from player one's point of view
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// A game of Dots and Boxes on `size × size` boxes.
#[derive(Debug, Clone)]
pub struct DotsAndBoxes {
    size: usize,
    board: Board,
    owners: Vec<Option<Player>>,
    turn: Player,
    done: bool,
}

impl DotsAndBoxes {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidBoardSize { size });
        }
        Ok(DotsAndBoxes {
            size,
            board: Board::empty(size),
            owners: vec![None; size * size],
            turn: Player::One,
            done: false,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn total_boxes(&self) -> usize {
        self.size * self.size
    }

    /// Start a new game with a randomly chosen first player.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameState {
        let first = if rng.random::<bool>() {
            Player::One
        } else {
            Player::Two
        };
        self.reset_with(first)
    }

    /// Start a new game with the given first player.
    pub fn reset_with(&mut self, first: Player) -> GameState {
        self.board = Board::empty(self.size);
        self.owners = vec![None; self.total_boxes()];
        self.turn = first;
        self.done = false;
        self.observation()
    }

    /// Every edge not yet drawn, in encoder order
    pub fn available_actions(&self) -> Vec<Edge> {
        self.board.free_edges()
    }

    /// Boxes owned by a player
    pub fn points(&self, player: Player) -> usize {
        self.owners
            .iter()
            .filter(|owner| **owner == Some(player))
            .count()
    }

    /// Owner of the box whose top-left dot is `(row, col)`
    pub fn box_owner(&self, row: usize, col: usize) -> Option<Player> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.owners[row * self.size + col]
    }

    /// The player with more boxes once the game is over
    pub fn winner(&self) -> Option<Player> {
        if !self.done {
            return None;
        }
        let (one, two) = (self.points(Player::One), self.points(Player::Two));
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Current observation: drawn edges and the mover's box count
    pub fn observation(&self) -> GameState {
        GameState::new(self.board.taken_edges(), self.points(self.turn) as i32)
    }

    /// Draw an edge for the player to move.
    ///
    /// Closing at least one box earns the mover another turn.
    pub fn step(&mut self, edge: Edge) -> Result<StepResult> {
        if self.done {
            return Err(Error::GameOver);
        }
        if self.board.is_taken(&edge)? {
            return Err(Error::EdgeAlreadyTaken { edge });
        }

        let one_before = self.points(Player::One);
        let two_before = self.points(Player::Two);

        self.board.take(&edge)?;
        let mut closed = 0;
        for (row, col) in self.adjacent_boxes(&edge) {
            if self.owners[row * self.size + col].is_none() && self.is_closed(row, col) {
                self.owners[row * self.size + col] = Some(self.turn);
                closed += 1;
            }
        }
        if closed == 0 {
            self.turn = self.turn.opponent();
        }

        let one = self.points(Player::One);
        let two = self.points(Player::Two);
        let total = self.total_boxes();
        self.done = one.max(two) > total / 2 || one + two == total;

        let new_one = one - one_before;
        let new_two = two - two_before;
        let mut reward = new_one as f64 - new_two as f64;
        if self.done {
            if one > two {
                reward += total as f64;
            } else if one < two {
                reward -= total as f64;
            }
        }

        Ok(StepResult {
            state: self.observation(),
            reward,
            done: self.done,
            info: StepInfo {
                player_one_points: one,
                player_two_points: two,
                new_player_one_points: new_one,
                new_player_two_points: new_two,
                player_turn: self.turn,
            },
        })
    }

    /// The four sides of a box: top, left, bottom, right
    pub fn box_sides(row: usize, col: usize) -> [Edge; 4] {
        [
            Edge::new((row, col), (row, col + 1)),
            Edge::new((row, col), (row + 1, col)),
            Edge::new((row + 1, col), (row + 1, col + 1)),
            Edge::new((row, col + 1), (row + 1, col + 1)),
        ]
    }

    fn is_closed(&self, row: usize, col: usize) -> bool {
        Self::box_sides(row, col)
            .iter()
            .all(|side| self.board.is_taken(side).unwrap_or(false))
    }

    /// Boxes that have `edge` as one of their sides
    fn adjacent_boxes(&self, edge: &Edge) -> Vec<(usize, usize)> {
        let (first, _) = edge.endpoints();
        let (row, col) = (first.row, first.col);
        let mut boxes = Vec::with_capacity(2);
        if edge.is_horizontal() {
            if row > 0 {
                boxes.push((row - 1, col));
            }
            if row < self.size {
                boxes.push((row, col));
            }
        } else {
            if col > 0 {
                boxes.push((row, col - 1));
            }
            if col < self.size {
                boxes.push((row, col));
            }
        }
        boxes
    }
}
