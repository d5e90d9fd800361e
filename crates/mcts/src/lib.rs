//! Generic Monte Carlo Tree Search.
//!
//! This crate provides an MCTS engine over any state space implementing
//! the `canopy_core::State` trait: a type that can enumerate its
//! successor states, detect terminal states, and report a terminal
//! reward.
//!
//! # Features
//!
//! - **Generic**: Works with any `State` implementation
//! - **Arena storage**: Append-only, index-addressed node store with
//!   explicit parent/child links
//! - **UCT/UCB selection**: Configurable tree policy with an exploration
//!   coefficient
//! - **Uniform-random rollouts**: Value estimates from random playouts
//!   to a terminal state
//! - **Reporting**: Fixed-shape per-node diagnostics for external
//!   visualization
//!
//! # Example
//!
//! ```
//! use canopy_mcts::{games::TicTacToeState, Mcts, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::from_root(SearchConfig::default(), TicTacToeState::new(), rng);
//!
//! let next = mcts.best_next_state(200).unwrap();
//! println!("best move:\n{}", next);
//! println!("tree size: {}", mcts.arena().len());
//! ```

pub mod config;
pub mod games;
mod node;
pub mod policy;
mod report;
mod search;
mod tree;

pub use config::SearchConfig;
pub use node::{Node, NodeId};
pub use policy::TreePolicy;
pub use report::{NodeReport, TreeReport};
pub use search::Mcts;
pub use tree::Arena;
