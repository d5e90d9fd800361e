//! Canopy Core - State abstractions and common types
//!
//! This crate provides the core [`State`] trait that defines the
//! interface for any domain to be searchable by the canopy MCTS engine,
//! together with the shared error taxonomy.
//!
//! # Types
//!
//! - [`State`] - Trait for domain state implementations
//! - [`MctsError`] - Error taxonomy shared by tree and search operations

mod error;
mod state;

pub use error::{MctsError, Result};
pub use state::State;
