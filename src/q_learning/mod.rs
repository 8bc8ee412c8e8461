//! Q-learning over a symmetry-aware value table
//!
//! The [`BoardSaver`] stores one value per canonical `(board, score, action)`
//! triple, so everything learned about a position carries over to its 7
//! rotated and reflected images. [`EpsilonGreedyAgent`] fills that table with
//! one-step Q-learning:
//!
//! ```text
//! Q(s, a) ← Q(s, a) + α (r + γ max_a' Q(s', a') − Q(s, a))
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use dotsbox::{
//!     app::AgentConfig,
//!     game::{DotsAndBoxes, Player},
//!     ports::Agent,
//!     q_learning::EpsilonGreedyAgent,
//! };
//!
//! let mut env = DotsAndBoxes::new(2)?;
//! let state = env.reset_with(Player::One);
//! let mut agent = EpsilonGreedyAgent::new(2, AgentConfig::default().with_seed(7))?;
//! let edge = agent.select_action(&state, &env.available_actions())?;
//! env.step(edge)?;
//! assert_eq!(agent.table().num_states(), 1);
//! # Ok::<(), dotsbox::Error>(())
//! ```

pub mod agent;
pub mod board_saver;
pub mod serialization;

// Public re-exports
pub use agent::EpsilonGreedyAgent;
pub use board_saver::{BoardSaver, CanonicalContext};
pub use serialization::{SavedTable, TableMetadata};
