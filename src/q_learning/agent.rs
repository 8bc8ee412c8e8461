//! Epsilon-greedy Q-learning agent
//!
//! The agent owns its [`BoardSaver`]. States are added lazily: the first time
//! the agent sees a state, every available action gets the configured initial
//! value, which is optimistic by default and drives early exploration.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    app::AgentConfig,
    board::{Action, Edge, GameState},
    error::{Error, Result},
    ports::{Agent, Transition},
    q_learning::board_saver::BoardSaver,
    utils::{build_rng, choose_uniform},
};

fn to_actions(edges: &[Edge]) -> Vec<Action> {
    edges.iter().copied().map(Action::from).collect()
}

/// Q-learning agent with ε-greedy exploration
#[derive(Debug, Clone)]
pub struct EpsilonGreedyAgent {
    table: BoardSaver,
    config: AgentConfig,
    epsilon: f64,
    initial_value: f64,
    rng: StdRng,
    training_error: Vec<f64>,
}

impl EpsilonGreedyAgent {
    /// Create an agent with an empty table for `size × size` boards.
    pub fn new(size: usize, config: AgentConfig) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidBoardSize { size });
        }
        Self::with_table(BoardSaver::new(size), config)
    }

    /// Continue learning on an existing table.
    pub fn with_table(table: BoardSaver, config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            initial_value: config.initial_value_for(table.size()),
            epsilon: config.initial_epsilon,
            rng: build_rng(config.seed),
            table,
            config,
            training_error: Vec::new(),
        })
    }

    pub fn table(&self) -> &BoardSaver {
        &self.table
    }

    pub fn into_table(self) -> BoardSaver {
        self.table
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Temporal difference of every update so far, oldest first
    pub fn training_error(&self) -> &[f64] {
        &self.training_error
    }

    /// Mean absolute temporal difference over the last `window` updates
    pub fn recent_error(&self, window: usize) -> Option<f64> {
        let start = self.training_error.len().saturating_sub(window);
        let recent = &self.training_error[start..];
        if recent.is_empty() {
            return None;
        }
        Some(recent.iter().map(|e| e.abs()).sum::<f64>() / recent.len() as f64)
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.final_epsilon);
    }

    /// Best value reachable from `state`, initializing it if unseen
    fn next_value(&mut self, state: &GameState, edges: &[Edge]) -> Result<f64> {
        let actions = to_actions(edges);
        self.table.initialize(state, &actions, self.initial_value)?;
        let (_, value) = self.table.best_action(state, &actions)?;
        Ok(value)
    }
}

impl Agent for EpsilonGreedyAgent {
    fn select_action(&mut self, state: &GameState, actions: &[Edge]) -> Result<Edge> {
        if actions.is_empty() {
            return Err(Error::NoActionsAvailable);
        }
        let candidates = to_actions(actions);
        self.table.initialize(state, &candidates, self.initial_value)?;

        if self.rng.random::<f64>() < self.epsilon {
            // Explore
            choose_uniform(&mut self.rng, actions)
        } else {
            let (action, _) = self.table.best_action(state, &candidates)?;
            Ok(action.edge())
        }
    }

    fn observe(&mut self, transition: &Transition<'_>) -> Result<()> {
        let action = Action::from(transition.action);
        self.table.initialize(transition.state, &[action], self.initial_value)?;
        let old_value = self.table.get(transition.state, action)?;

        let next_value = if transition.done || transition.next_actions.is_empty() {
            0.0
        } else {
            self.next_value(transition.next_state, transition.next_actions)?
        };

        let temporal_difference = transition.reward + self.config.gamma * next_value - old_value;
        let new_value = old_value + self.config.learning_rate * temporal_difference;
        self.table.define(transition.state, action, new_value)?;
        self.training_error.push(temporal_difference);
        self.decay_epsilon();
        Ok(())
    }

    fn name(&self) -> &str {
        "epsilon-greedy"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: (usize, usize), b: (usize, usize)) -> Edge {
        Edge::new(a, b)
    }

    fn greedy_config() -> AgentConfig {
        AgentConfig::default()
            .with_initial_epsilon(0.0)
            .with_final_epsilon(0.0)
            .with_seed(3)
    }

    fn all_edges(size: usize) -> Vec<Edge> {
        crate::board::EdgeEncoder::new(size).edges().collect()
    }

    #[test]
    fn test_unknown_state_gets_initial_value() {
        let mut agent = EpsilonGreedyAgent::new(2, greedy_config()).unwrap();
        let state = GameState::default();
        let actions = all_edges(2);
        agent.select_action(&state, &actions).unwrap();

        assert_eq!(agent.table().num_states(), 1);
        for &e in &actions {
            assert_eq!(agent.table().get(&state, e.into()).unwrap(), 2.0);
        }
    }

    #[test]
    fn test_greedy_choice_follows_table() {
        let mut table = BoardSaver::new(2);
        let state = GameState::new(vec![edge((0, 0), (0, 1))], 0);
        let actions = vec![edge((0, 0), (1, 0)), edge((1, 1), (1, 2))];
        table.define(&state, actions[0].into(), 0.5).unwrap();
        table.define(&state, actions[1].into(), 4.0).unwrap();

        let mut agent = EpsilonGreedyAgent::with_table(table, greedy_config()).unwrap();
        assert_eq!(agent.select_action(&state, &actions).unwrap(), actions[1]);
    }

    #[test]
    fn test_terminal_update() {
        let config = greedy_config().with_learning_rate(0.5).with_gamma(0.5);
        let mut agent = EpsilonGreedyAgent::new(2, config).unwrap();
        let state = GameState::default();
        let actions = all_edges(2);
        let chosen = agent.select_action(&state, &actions).unwrap();
        let next = GameState::new(vec![chosen], 0);

        agent
            .observe(&Transition {
                state: &state,
                action: chosen,
                reward: 1.0,
                done: true,
                next_state: &next,
                next_actions: &[],
            })
            .unwrap();

        // 2 + 0.5 * (1 + 0 - 2)
        assert_eq!(agent.table().get(&state, chosen.into()).unwrap(), 1.5);
        assert_eq!(agent.training_error(), &[-1.0]);
    }

    #[test]
    fn test_bootstraps_from_next_state() {
        let config = greedy_config().with_learning_rate(0.5).with_gamma(0.5);
        let mut agent = EpsilonGreedyAgent::new(2, config).unwrap();
        let state = GameState::default();
        let actions = all_edges(2);
        let chosen = agent.select_action(&state, &actions).unwrap();
        let next = GameState::new(vec![chosen], 0);
        let next_actions: Vec<Edge> = actions.iter().copied().filter(|&e| e != chosen).collect();

        agent
            .observe(&Transition {
                state: &state,
                action: chosen,
                reward: 0.0,
                done: false,
                next_state: &next,
                next_actions: &next_actions,
            })
            .unwrap();

        // next state initialized to 2: td = 0 + 0.5 * 2 - 2
        assert_eq!(agent.training_error(), &[-1.0]);
        assert_eq!(agent.table().get(&state, chosen.into()).unwrap(), 1.5);
        assert!(agent.table().contains(&next).unwrap());
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let config = AgentConfig::default()
            .with_initial_epsilon(0.5)
            .with_epsilon_decay(0.5)
            .with_final_epsilon(0.1)
            .with_seed(1);
        let mut agent = EpsilonGreedyAgent::new(1, config).unwrap();
        let state = GameState::default();
        let actions = all_edges(1);
        let mut expected = [0.25, 0.125, 0.1, 0.1].into_iter();

        for _ in 0..4 {
            let chosen = agent.select_action(&state, &actions).unwrap();
            let next = GameState::new(vec![chosen], 0);
            agent
                .observe(&Transition {
                    state: &state,
                    action: chosen,
                    reward: 0.0,
                    done: true,
                    next_state: &next,
                    next_actions: &[],
                })
                .unwrap();
            assert_eq!(agent.epsilon(), expected.next().unwrap());
        }
    }

    #[test]
    fn test_seeded_exploration_is_reproducible() {
        let config = AgentConfig::default()
            .with_initial_epsilon(1.0)
            .with_seed(11);
        let mut a = EpsilonGreedyAgent::new(3, config.clone()).unwrap();
        let mut b = EpsilonGreedyAgent::new(3, config).unwrap();
        let state = GameState::default();
        let actions = all_edges(3);

        for _ in 0..10 {
            assert_eq!(
                a.select_action(&state, &actions).unwrap(),
                b.select_action(&state, &actions).unwrap()
            );
        }
    }

    #[test]
    fn test_empty_action_list() {
        let mut agent = EpsilonGreedyAgent::new(2, greedy_config()).unwrap();
        assert!(matches!(
            agent.select_action(&GameState::default(), &[]),
            Err(Error::NoActionsAvailable)
        ));
    }
}
