use std::hash::Hash;

use crate::{MctsError, Result};

/// A state space abstraction for Monte Carlo Tree Search.
///
/// This trait defines the interface any domain must implement to be
/// searchable. It is designed to be domain-agnostic: the engine never
/// inspects a state beyond these three capabilities.
///
/// States are immutable value types. Equality and hashing must be
/// structural: two states built from the same data are the same state,
/// and the engine is free to clone states whenever it needs to.
pub trait State: Clone + PartialEq + Eq + Hash {
    /// Returns every state reachable from this one by a single legal
    /// action.
    ///
    /// The result is empty if and only if this state is terminal. A
    /// non-terminal state that returns no successors is a modeling bug
    /// and makes rollouts fail with [`MctsError::InvalidState`].
    fn next_states(&self) -> Vec<Self>;

    /// Returns true if no further actions exist from this state.
    fn is_terminal(&self) -> bool;

    /// Returns the reward for this terminal state.
    ///
    /// # Errors
    /// Returns [`MctsError::InvalidState`] when called on a non-terminal
    /// state; a default implementation of that guard is provided via
    /// [`State::require_terminal`].
    fn reward(&self) -> Result<f64>;

    /// Guard for `reward` implementations: fails unless the state is
    /// terminal.
    fn require_terminal(&self) -> Result<()> {
        if self.is_terminal() {
            Ok(())
        } else {
            Err(MctsError::InvalidState(
                "reward is only defined for terminal states".to_string(),
            ))
        }
    }
}
