//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hyperparameters of the epsilon-greedy Q-learner.
///
/// This type provides a builder-style API; every setter consumes and returns
/// the config so calls chain.
///
/// # Examples
///
/// ```
/// use dotsbox::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.1)
///     .with_gamma(0.9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size α of the temporal difference update
    pub learning_rate: f64,
    /// Exploration rate at the start of training
    pub initial_epsilon: f64,
    /// Multiplicative epsilon decay applied after every update
    pub epsilon_decay: f64,
    /// Lower bound for epsilon
    pub final_epsilon: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Value given to actions of states seen for the first time.
    ///
    /// `None` means the board size.
    pub initial_value: Option<f64>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the starting exploration rate.
    pub fn with_initial_epsilon(mut self, epsilon: f64) -> Self {
        self.initial_epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, decay: f64) -> Self {
        self.epsilon_decay = decay;
        self
    }

    pub fn with_final_epsilon(mut self, epsilon: f64) -> Self {
        self.final_epsilon = epsilon;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Override the optimistic initial value.
    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Initial value for a board of `size × size` boxes
    pub fn initial_value_for(&self, size: usize) -> f64 {
        self.initial_value.unwrap_or(size as f64)
    }

    /// Reject rates outside `[0, 1]` and an epsilon floor above the start.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("learning_rate", self.learning_rate),
            ("initial_epsilon", self.initial_epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("final_epsilon", self.final_epsilon),
            ("gamma", self.gamma),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if self.final_epsilon > self.initial_epsilon {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "final_epsilon ({}) exceeds initial_epsilon ({})",
                    self.final_epsilon, self.initial_epsilon
                ),
            });
        }
        if let Some(value) = self.initial_value
            && !value.is_finite()
        {
            return Err(Error::InvalidConfiguration {
                message: format!("initial_value must be finite, got {value}"),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            initial_epsilon: 0.1,
            epsilon_decay: 0.999_995,
            final_epsilon: 0.01,
            gamma: 0.95,
            initial_value: None,
            seed: None,
        }
    }
}
