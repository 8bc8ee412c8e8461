//! Symmetry-aware value table keyed by canonical board, score and action
//!
//! A state and any of its 7 other symmetry images share one table entry. The
//! canonical image is the one whose board has the smallest integer value (see
//! [`Board`]'s ordering). When several images share that board, which happens
//! for boards that are themselves symmetric, the smallest action image among
//! them is taken, so every member of the orbit resolves to the same key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    board::{Action, Board, Edge, EdgeEncoder, GameState, Rotator},
    error::{Error, Result},
    utils::argmax,
};

type ActionValues = HashMap<Action, f64>;
type ScoreTable = HashMap<i32, ActionValues>;

/// Cached result of canonicalizing one board.
///
/// Building it costs 8 board images; mapping any number of actions through
/// it afterwards only transforms the actions.
#[derive(Debug, Clone)]
pub struct CanonicalContext {
    images: Vec<Board>,
    best: usize,
    rotator: Rotator,
}

impl CanonicalContext {
    pub fn new(board: &Board) -> Self {
        let images: Vec<Board> = board.rotations().collect();
        let mut best = 0;
        for (index, image) in images.iter().enumerate().skip(1) {
            if image < &images[best] {
                best = index;
            }
        }

        CanonicalContext {
            images,
            best,
            rotator: board.rotator(),
        }
    }

    /// The canonical board
    pub fn board(&self) -> &Board {
        &self.images[self.best]
    }

    /// Map an action on the original board to its canonical counterpart.
    ///
    /// The action must lie on the grid; [`BoardSaver`] validates before
    /// calling this.
    pub fn map_action_to_canonical(&self, action: Action) -> Action {
        let canonical = self.board();
        action
            .rotations(self.rotator)
            .zip(&self.images)
            .filter(|(_, image)| *image == canonical)
            .map(|(image, _)| image)
            .min()
            .unwrap_or(action)
    }
}

/// Learned action values for one board size.
///
/// Keys are three levels deep: canonical board, then score, then canonical
/// action. Entries are created on first [`define`](Self::define) and never
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSaver {
    size: usize,
    boards: HashMap<Board, ScoreTable>,
}

impl BoardSaver {
    pub fn new(size: usize) -> Self {
        BoardSaver {
            size,
            boards: HashMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rotator(&self) -> Rotator {
        Rotator::new(self.size)
    }

    /// Canonicalize a list of drawn edges
    pub fn canonical_context(&self, edges: &[Edge]) -> Result<CanonicalContext> {
        let board = Board::new(self.size, edges)?;
        Ok(CanonicalContext::new(&board))
    }

    /// The canonical board of a list of drawn edges
    pub fn canonical_board(&self, edges: &[Edge]) -> Result<Board> {
        Ok(self.canonical_context(edges)?.board().clone())
    }

    /// The canonical `(board, action)` pair
    pub fn canonical_pair(&self, edges: &[Edge], action: Action) -> Result<(Board, Action)> {
        self.check_action(action)?;
        let ctx = self.canonical_context(edges)?;
        let canonical_action = ctx.map_action_to_canonical(action);
        Ok((ctx.board().clone(), canonical_action))
    }

    /// Whether any symmetry image of the state has a defined action value
    pub fn contains(&self, state: &GameState) -> Result<bool> {
        let ctx = self.canonical_context(&state.edges)?;
        Ok(self
            .boards
            .get(ctx.board())
            .and_then(|scores| scores.get(&state.score))
            .is_some_and(|actions| !actions.is_empty()))
    }

    /// The value stored for the state's canonical image and the action.
    ///
    /// Fails with [`Error::KeyNotFound`] if it was never defined.
    pub fn get(&self, state: &GameState, action: Action) -> Result<f64> {
        self.check_action(action)?;
        let ctx = self.canonical_context(&state.edges)?;
        self.lookup(&ctx, state.score, action)
    }

    /// Insert or overwrite the value of an action in a state.
    pub fn define(&mut self, state: &GameState, action: Action, value: f64) -> Result<()> {
        self.check_action(action)?;
        let ctx = self.canonical_context(&state.edges)?;
        let canonical_action = ctx.map_action_to_canonical(action);

        self.boards
            .entry(ctx.board().clone())
            .or_default()
            .entry(state.score)
            .or_default()
            .insert(canonical_action, value);
        Ok(())
    }

    /// Values of several actions in one state, canonicalizing the board once.
    pub fn action_values(&self, state: &GameState, actions: &[Action]) -> Result<Vec<f64>> {
        let ctx = self.canonical_context(&state.edges)?;
        actions
            .iter()
            .map(|&action| {
                self.check_action(action)?;
                self.lookup(&ctx, state.score, action)
            })
            .collect()
    }

    /// The action with the highest value; ties go to the earliest action.
    pub fn best_action(&self, state: &GameState, actions: &[Action]) -> Result<(Action, f64)> {
        let values = self.action_values(state, actions)?;
        let best = argmax(&values).ok_or(Error::NoActionsAvailable)?;
        Ok((actions[best], values[best]))
    }

    /// Give every listed action of a state that has no value yet the value
    /// `value`, leaving defined actions untouched.
    ///
    /// Returns whether the state was previously unknown.
    pub fn initialize(
        &mut self,
        state: &GameState,
        actions: &[Action],
        value: f64,
    ) -> Result<bool> {
        let ctx = self.canonical_context(&state.edges)?;
        let known = self
            .boards
            .get(ctx.board())
            .and_then(|scores| scores.get(&state.score))
            .is_some_and(|values| !values.is_empty());

        let mut canonical_actions = Vec::with_capacity(actions.len());
        for &action in actions {
            self.check_action(action)?;
            canonical_actions.push(ctx.map_action_to_canonical(action));
        }
        let values = self
            .boards
            .entry(ctx.board().clone())
            .or_default()
            .entry(state.score)
            .or_default();
        for action in canonical_actions {
            values.entry(action).or_insert(value);
        }
        Ok(!known)
    }

    /// Number of canonical boards stored
    pub fn num_boards(&self) -> usize {
        self.boards.len()
    }

    /// Number of `(board, score)` states stored
    pub fn num_states(&self) -> usize {
        self.boards.values().map(|scores| scores.len()).sum()
    }

    /// Total number of stored values
    pub fn len(&self) -> usize {
        self.boards
            .values()
            .flat_map(|scores| scores.values())
            .map(|actions| actions.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    fn lookup(&self, ctx: &CanonicalContext, score: i32, action: Action) -> Result<f64> {
        let canonical_action = ctx.map_action_to_canonical(action);
        self.boards
            .get(ctx.board())
            .and_then(|scores| scores.get(&score))
            .and_then(|actions| actions.get(&canonical_action))
            .copied()
            .ok_or(Error::KeyNotFound {
                score,
                action: action.edge(),
            })
    }

    fn check_action(&self, action: Action) -> Result<()> {
        EdgeEncoder::new(self.size).edge_position(&action.edge())?;
        Ok(())
    }
}
