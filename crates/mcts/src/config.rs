//! Search configuration parameters.

use crate::policy::TreePolicy;

/// Per-session search configuration.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Scoring formula used throughout the search.
    pub tree_policy: TreePolicy,

    /// Exploration coefficient used during selection.
    ///
    /// Not applied to the final best-child read-out, which always uses
    /// pure exploitation.
    pub c: f64,

    /// Negate the backpropagated reward at every node on the update
    /// path.
    ///
    /// The inversion is uniform, never alternating by tree depth:
    /// two-player callers that need strict adversarial semantics must
    /// encode perspective in their state's reward sign convention.
    pub invert_reward: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tree_policy: TreePolicy::Ucb,
            c: std::f64::consts::SQRT_2,
            invert_reward: false,
        }
    }
}

impl SearchConfig {
    /// Create a config with the given policy and default coefficients.
    pub fn with_policy(tree_policy: TreePolicy) -> Self {
        Self {
            tree_policy,
            ..Default::default()
        }
    }

    /// Create a config with no exploration bonus (`c = 0`).
    pub fn exploitation_only() -> Self {
        Self {
            c: 0.0,
            ..Default::default()
        }
    }

    /// Enable reward inversion on this config.
    pub fn inverted(mut self) -> Self {
        self.invert_reward = true;
        self
    }
}
