//! Fixed move-selection policies
//!
//! None of these learn. The table-backed ones read a snapshot of a learner's
//! [`BoardSaver`], replaced through [`Agent::refresh_table`].

use std::collections::HashSet;

use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    board::{Action, Edge, GameState},
    error::{Error, Result},
    game::DotsAndBoxes,
    ports::Agent,
    q_learning::BoardSaver,
    utils::{argmax, build_rng, choose_uniform},
};

/// Picks uniformly among the available edges
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Agent for RandomPolicy {
    fn select_action(&mut self, _state: &GameState, actions: &[Edge]) -> Result<Edge> {
        choose_uniform(&mut self.rng, actions)
    }

    fn name(&self) -> &str {
        "random"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Completes a box whenever three of its sides are drawn, otherwise plays
/// randomly.
#[derive(Debug, Clone)]
pub struct CloseBoxesPolicy {
    size: usize,
    rng: StdRng,
}

impl CloseBoxesPolicy {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        Self {
            size,
            rng: build_rng(seed),
        }
    }

    /// The missing side of the first box, row-major, with exactly one side
    /// left.
    pub fn closing_move(&self, actions: &[Edge]) -> Option<Edge> {
        let free: HashSet<Edge> = actions.iter().copied().collect();
        for row in 0..self.size {
            for col in 0..self.size {
                let sides = DotsAndBoxes::box_sides(row, col);
                let mut open = sides.iter().filter(|side| free.contains(side));
                if let (Some(&side), None) = (open.next(), open.next()) {
                    return Some(side);
                }
            }
        }
        None
    }
}

impl Agent for CloseBoxesPolicy {
    fn select_action(&mut self, _state: &GameState, actions: &[Edge]) -> Result<Edge> {
        match self.closing_move(actions) {
            Some(edge) => Ok(edge),
            None => choose_uniform(&mut self.rng, actions),
        }
    }

    fn name(&self) -> &str {
        "greedy"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Highest-valued known action of a known state.
///
/// Actions missing from the table are skipped; `None` when the state or all
/// of its actions are unknown.
fn best_known(table: &BoardSaver, state: &GameState, actions: &[Edge]) -> Result<Option<Edge>> {
    if actions.is_empty() {
        return Err(Error::NoActionsAvailable);
    }
    if !table.contains(state)? {
        return Ok(None);
    }

    let mut known = Vec::with_capacity(actions.len());
    let mut values = Vec::with_capacity(actions.len());
    for &edge in actions {
        match table.get(state, Action::from(edge)) {
            Ok(value) => {
                known.push(edge);
                values.push(value);
            }
            Err(Error::KeyNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(argmax(&values).map(|best| known[best]))
}

/// Greedy by table value in known states, random elsewhere
#[derive(Debug, Clone)]
pub struct MaxIfKnownPolicy {
    table: BoardSaver,
    fallback: RandomPolicy,
}

impl MaxIfKnownPolicy {
    pub fn new(table: BoardSaver, seed: Option<u64>) -> Self {
        Self {
            table,
            fallback: RandomPolicy::new(seed),
        }
    }

    pub fn table(&self) -> &BoardSaver {
        &self.table
    }
}

impl Agent for MaxIfKnownPolicy {
    fn select_action(&mut self, state: &GameState, actions: &[Edge]) -> Result<Edge> {
        match best_known(&self.table, state, actions)? {
            Some(edge) => Ok(edge),
            None => self.fallback.select_action(state, actions),
        }
    }

    fn name(&self) -> &str {
        "max-if-known"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.fallback.set_rng_seed(seed)
    }

    fn refresh_table(&mut self, table: &BoardSaver) -> Result<()> {
        if table.size() != self.table.size() {
            return Err(Error::SizeMismatch {
                expected: self.table.size(),
                got: table.size(),
            });
        }
        self.table = table.clone();
        debug!("{} adopted a table with {} states", self.name(), self.table.num_states());
        Ok(())
    }
}

/// Greedy by table value in known states, box-closing elsewhere
#[derive(Debug, Clone)]
pub struct MixerPolicy {
    table: BoardSaver,
    fallback: CloseBoxesPolicy,
}

impl MixerPolicy {
    pub fn new(table: BoardSaver, seed: Option<u64>) -> Self {
        let fallback = CloseBoxesPolicy::new(table.size(), seed);
        Self { table, fallback }
    }

    pub fn table(&self) -> &BoardSaver {
        &self.table
    }
}

impl Agent for MixerPolicy {
    fn select_action(&mut self, state: &GameState, actions: &[Edge]) -> Result<Edge> {
        match best_known(&self.table, state, actions)? {
            Some(edge) => Ok(edge),
            None => self.fallback.select_action(state, actions),
        }
    }

    fn name(&self) -> &str {
        "mixer"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.fallback.set_rng_seed(seed)
    }

    fn refresh_table(&mut self, table: &BoardSaver) -> Result<()> {
        if table.size() != self.table.size() {
            return Err(Error::SizeMismatch {
                expected: self.table.size(),
                got: table.size(),
            });
        }
        self.table = table.clone();
        debug!("{} adopted a table with {} states", self.name(), self.table.num_states());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EdgeEncoder;

    fn edge(a: (usize, usize), b: (usize, usize)) -> Edge {
        Edge::new(a, b)
    }

    fn free_edges(size: usize, taken: &[Edge]) -> Vec<Edge> {
        EdgeEncoder::new(size)
            .edges()
            .filter(|e| !taken.contains(e))
            .collect()
    }

    #[test]
    fn test_random_policy_stays_in_action_space() {
        let mut policy = RandomPolicy::new(Some(4));
        let actions = free_edges(2, &[]);
        for _ in 0..50 {
            let chosen = policy.select_action(&GameState::default(), &actions).unwrap();
            assert!(actions.contains(&chosen));
        }
        assert!(matches!(
            policy.select_action(&GameState::default(), &[]),
            Err(Error::NoActionsAvailable)
        ));
    }

    #[test]
    fn test_close_boxes_takes_last_side() {
        let taken = [
            edge((1, 1), (1, 2)),
            edge((1, 1), (2, 1)),
            edge((2, 1), (2, 2)),
        ];
        let actions = free_edges(2, &taken);
        let mut policy = CloseBoxesPolicy::new(2, Some(0));
        let state = GameState::new(taken.to_vec(), 0);
        assert_eq!(
            policy.select_action(&state, &actions).unwrap(),
            edge((1, 2), (2, 2))
        );
    }

    #[test]
    fn test_close_boxes_scans_row_major() {
        let taken = [
            // box (1, 0) missing its top
            edge((1, 0), (2, 0)),
            edge((2, 0), (2, 1)),
            edge((1, 1), (2, 1)),
            // box (0, 1) missing its left
            edge((0, 1), (0, 2)),
            edge((1, 1), (1, 2)),
            edge((0, 2), (1, 2)),
        ];
        let policy = CloseBoxesPolicy::new(2, Some(0));
        assert_eq!(
            policy.closing_move(&free_edges(2, &taken)),
            Some(edge((0, 1), (1, 1)))
        );
        assert_eq!(policy.closing_move(&free_edges(2, &[])), None);
    }

    #[test]
    fn test_max_if_known_uses_table() {
        let mut table = BoardSaver::new(2);
        let state = GameState::new(vec![edge((0, 0), (0, 1))], 0);
        let actions = free_edges(2, &state.edges);
        let target = edge((2, 1), (2, 2));
        for &a in &actions {
            table.define(&state, a.into(), 0.0).unwrap();
        }
        table.define(&state, target.into(), 1.0).unwrap();

        let mut policy = MaxIfKnownPolicy::new(table, Some(1));
        assert_eq!(policy.select_action(&state, &actions).unwrap(), target);
    }

    #[test]
    fn test_max_if_known_skips_undefined_actions() {
        let mut table = BoardSaver::new(2);
        let state = GameState::new(vec![edge((0, 0), (0, 1))], 0);
        let only = edge((1, 0), (1, 1));
        table.define(&state, only.into(), -5.0).unwrap();

        let actions = free_edges(2, &state.edges);
        let mut policy = MaxIfKnownPolicy::new(table, Some(1));
        assert_eq!(policy.select_action(&state, &actions).unwrap(), only);
    }

    #[test]
    fn test_mixer_falls_back_to_closing_boxes() {
        let taken = vec![
            edge((0, 0), (0, 1)),
            edge((0, 0), (1, 0)),
            edge((1, 0), (1, 1)),
        ];
        let state = GameState::new(taken.clone(), 0);
        let mut policy = MixerPolicy::new(BoardSaver::new(2), Some(2));
        assert_eq!(
            policy.select_action(&state, &free_edges(2, &taken)).unwrap(),
            edge((0, 1), (1, 1))
        );
    }

    #[test]
    fn test_refresh_table_replaces_snapshot() {
        let state = GameState::default();
        let actions = free_edges(1, &[]);
        let mut learned = BoardSaver::new(1);
        for &a in &actions {
            learned.define(&state, a.into(), 0.0).unwrap();
        }

        let mut policy = MixerPolicy::new(BoardSaver::new(1), Some(3));
        assert!(!policy.table().contains(&state).unwrap());
        policy.refresh_table(&learned).unwrap();
        assert!(policy.table().contains(&state).unwrap());

        assert!(matches!(
            policy.refresh_table(&BoardSaver::new(3)),
            Err(Error::SizeMismatch { .. })
        ));
    }
}
