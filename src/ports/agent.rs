//! Agent port - anything that can choose moves in a game

use crate::{
    Result,
    board::{Edge, GameState},
    q_learning::BoardSaver,
};

/// One move and its consequences, as reported to the agent that made it.
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// State the move was chosen in
    pub state: &'a GameState,
    /// The edge that was drawn
    pub action: Edge,
    /// Reward from player one's point of view
    pub reward: f64,
    /// Whether the move ended the game
    pub done: bool,
    /// State after the move
    pub next_state: &'a GameState,
    /// Edges still free after the move
    pub next_actions: &'a [Edge],
}

/// Unified interface for learners, fixed policies and humans.
///
/// # Examples
///
/// ```
/// use dotsbox::{
///     board::{Edge, GameState},
///     ports::Agent,
/// };
///
/// struct FirstEdge;
///
/// impl Agent for FirstEdge {
///     fn select_action(&mut self, _state: &GameState, actions: &[Edge]) -> dotsbox::Result<Edge> {
///         actions.first().copied().ok_or(dotsbox::Error::NoActionsAvailable)
///     }
///
///     fn name(&self) -> &str {
///         "first-edge"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Choose one of `actions` for the given state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoActionsAvailable`] when `actions` is empty.
    fn select_action(&mut self, state: &GameState, actions: &[Edge]) -> Result<Edge>;

    /// Learn from the outcome of a move this agent made.
    ///
    /// The default implementation does nothing, suitable for fixed policies.
    fn observe(&mut self, _transition: &Transition<'_>) -> Result<()> {
        Ok(())
    }

    /// Name used in logs and comparison reports.
    fn name(&self) -> &str;

    /// Reseed the agent's random number generator, if it has one.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Adopt a snapshot of a learner's value table.
    ///
    /// Table-backed policies replace their table; everything else ignores it.
    fn refresh_table(&mut self, _table: &BoardSaver) -> Result<()> {
        Ok(())
    }
}
