//! Monte Carlo Tree Search over an abstract state space.
//!
//! One [`Mcts::step`] runs the four phases in strict order: select a
//! node via the tree policy, expand one random untried successor,
//! rollout to a terminal state with uniform-random moves, and
//! backpropagate the terminal reward along the ancestor chain.

use std::fmt::Display;

use canopy_core::{MctsError, Result, State};
use rand::Rng;

use crate::{
    config::SearchConfig,
    node::NodeId,
    tree::Arena,
};

/// Monte Carlo Tree Search engine and driver.
///
/// Generic over:
/// - `S`: The domain state being searched
/// - `R`: The random number generator
///
/// The engine owns its arena exclusively for the whole session: search
/// is single-threaded and synchronous, with the iteration count as the
/// only termination control. Callers wanting wall-clock bounds check
/// elapsed time between [`Mcts::step`] calls themselves.
#[derive(Debug)]
pub struct Mcts<S: State, R: Rng> {
    config: SearchConfig,
    rng: R,
    arena: Arena<S>,
}

impl<S: State, R: Rng> Mcts<S, R> {
    /// Create an engine over a fresh single-root arena.
    pub fn from_root(config: SearchConfig, root_state: S, rng: R) -> Self {
        Self {
            config,
            rng,
            arena: Arena::from_root_state(root_state),
        }
    }

    /// Create an engine whose root state is built from raw field
    /// values.
    ///
    /// # Errors
    /// `MctsError::Construction` when the fields cannot build a valid
    /// state.
    pub fn try_from_root_fields<F>(config: SearchConfig, fields: F, rng: R) -> Result<Self>
    where
        S: TryFrom<F>,
        <S as TryFrom<F>>::Error: Display,
    {
        Ok(Self {
            config,
            rng,
            arena: Arena::try_from_root_fields(fields)?,
        })
    }

    /// Create an engine over an existing arena.
    ///
    /// # Errors
    /// `MctsError::EmptyTree` when the arena has no root to search
    /// from.
    pub fn with_arena(config: SearchConfig, arena: Arena<S>, rng: R) -> Result<Self> {
        arena.root()?;
        Ok(Self { config, rng, arena })
    }

    /// The arena built so far. Kept accessible after the driver
    /// finishes so the session can be inspected or reported.
    pub fn arena(&self) -> &Arena<S> {
        &self.arena
    }

    /// The session configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search iteration: select, expand, simulate,
    /// backpropagate.
    ///
    /// Grows the arena by at most one node and increments the root's
    /// visit count by exactly one.
    ///
    /// # Errors
    /// `MctsError::InvalidState` when the domain model is inconsistent:
    /// a rollout reaches a non-terminal state with no successors, or a
    /// terminal state refuses to report its reward.
    pub fn step(&mut self) -> Result<()> {
        let selected = self.select();
        let expanded = self.expand(selected)?;
        let reward = self.simulate(expanded)?;
        self.backpropagate(expanded, reward);
        Ok(())
    }

    /// Run `iterations` steps, then return the state of the root's best
    /// child under pure exploitation (`c = 0`).
    ///
    /// All iterations run unconditionally; there is no convergence
    /// early-out.
    ///
    /// # Errors
    /// `MctsError::NoChildren` when the root has no children after the
    /// loop, which happens only for zero iterations or a terminal root
    /// state, plus the failures of [`Mcts::step`].
    pub fn best_next_state(&mut self, iterations: usize) -> Result<S> {
        for _ in 0..iterations {
            self.step()?;
        }

        let best = self
            .select_child(NodeId::ROOT, 0.0)
            .ok_or(MctsError::NoChildren)?;
        Ok(self.arena.get(best).state().clone())
    }

    /// Walk down from the root until a terminal or not-fully-expanded
    /// node is reached.
    fn select(&self) -> NodeId {
        let mut id = NodeId::ROOT;
        loop {
            let node = self.arena.get(id);
            if node.state().is_terminal() || !node.is_expanded() {
                return id;
            }
            // A fully expanded non-terminal node has all of its
            // successors materialized as children.
            id = self
                .select_child(id, self.config.c)
                .expect("BUG: expanded non-terminal node has no children");
        }
    }

    /// The child of `parent` maximizing the tree policy score, or None
    /// when there are no children. Ties keep the earliest-created
    /// child; callers must not rely on which equal-scored child wins.
    fn select_child(&self, parent: NodeId, c: f64) -> Option<NodeId> {
        let parent_node = self.arena.get(parent);
        let n_parent = parent_node.n();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in parent_node.children() {
            let child = self.arena.get(child_id);
            let score = self
                .config
                .tree_policy
                .score(child.q(), child.n(), n_parent, c);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Materialize one untried successor of `id` as a new child,
    /// returning its index. A fully expanded node (including a terminal
    /// leaf) is returned unchanged.
    fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let len = self.arena.get_mut(id).remaining_mut().len();
        if len == 0 {
            return Ok(id);
        }

        let pick = self.rng.gen_range(0..len);
        let state = self.arena.get_mut(id).remaining_mut().swap_remove(pick);
        self.arena.add_node(Some(id), state)
    }

    /// Uniform-random rollout from `id`'s state to a terminal state,
    /// returning that state's reward.
    fn simulate(&mut self, id: NodeId) -> Result<f64> {
        let mut current = self.arena.get(id).state().clone();
        while !current.is_terminal() {
            let mut successors = current.next_states();
            if successors.is_empty() {
                return Err(MctsError::InvalidState(
                    "non-terminal state has no successor states".to_string(),
                ));
            }
            let pick = self.rng.gen_range(0..successors.len());
            current = successors.swap_remove(pick);
        }
        current.reward()
    }

    /// Update statistics from `id` up to the root inclusive.
    ///
    /// Iterative parent-pointer walk rather than recursion, so deep
    /// trees cannot overflow the call stack.
    fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let delta = if self.config.invert_reward {
            -reward
        } else {
            reward
        };

        let mut cursor = Some(id);
        while let Some(ix) = cursor {
            let node = self.arena.get_mut(ix);
            node.record_visit(delta);
            cursor = node.parent();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TreePolicy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Single-path game: each state has exactly one successor until
    /// zero is reached, which is terminal with reward 1.
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Chain(u8);

    impl State for Chain {
        fn next_states(&self) -> Vec<Self> {
            if self.0 == 0 {
                Vec::new()
            } else {
                vec![Chain(self.0 - 1)]
            }
        }

        fn is_terminal(&self) -> bool {
            self.0 == 0
        }

        fn reward(&self) -> Result<f64> {
            self.require_terminal()?;
            Ok(1.0)
        }
    }

    /// One-shot bandit: the root has two terminal successors with
    /// rewards 1 and 0.
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Bandit {
        Root,
        Arm(u8),
    }

    impl State for Bandit {
        fn next_states(&self) -> Vec<Self> {
            match self {
                Bandit::Root => vec![Bandit::Arm(0), Bandit::Arm(1)],
                Bandit::Arm(_) => Vec::new(),
            }
        }

        fn is_terminal(&self) -> bool {
            matches!(self, Bandit::Arm(_))
        }

        fn reward(&self) -> Result<f64> {
            self.require_terminal()?;
            match self {
                Bandit::Arm(1) => Ok(1.0),
                _ => Ok(0.0),
            }
        }
    }

    fn engine<S: State>(state: S, seed: u64) -> Mcts<S, ChaCha8Rng> {
        Mcts::from_root(SearchConfig::default(), state, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_step_accounting() {
        let mut mcts = engine(Chain(3), 42);

        for steps in 1..=20 {
            let before = mcts.arena().len();
            mcts.step().unwrap();

            // At most one node per step, root visited exactly once per
            // step.
            assert!(mcts.arena().len() <= before + 1);
            assert_eq!(mcts.arena().root().unwrap().n(), steps);
        }
    }

    #[test]
    fn test_backpropagation_walks_ancestor_chain() {
        let mut mcts = engine(Chain(3), 7);
        for _ in 0..10 {
            mcts.step().unwrap();
        }

        // The tree is a single path, so visit counts are non-increasing
        // with depth and every visit carried reward 1.
        let arena = mcts.arena();
        let mut cursor = NodeId::ROOT;
        let mut prev = arena.get(cursor).n();
        assert_eq!(prev, 10);
        while let Some(&child) = arena.get(cursor).children().first() {
            let node = arena.get(child);
            assert!(node.n() <= prev);
            assert!((node.q() - f64::from(node.n())).abs() < 1e-9);
            prev = node.n();
            cursor = child;
        }
    }

    #[test]
    fn test_invert_reward_negates_q() {
        let mut mcts = Mcts::from_root(
            SearchConfig::default().inverted(),
            Chain(2),
            ChaCha8Rng::seed_from_u64(3),
        );
        for _ in 0..5 {
            mcts.step().unwrap();
        }

        let root = mcts.arena().root().unwrap();
        assert_eq!(root.n(), 5);
        assert!((root.q() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_next_state_picks_winning_arm() {
        let mut mcts = engine(Bandit::Root, 11);
        let best = mcts.best_next_state(100).unwrap();
        assert_eq!(best, Bandit::Arm(1));
    }

    #[test]
    fn test_best_next_state_zero_iterations() {
        let mut mcts = engine(Bandit::Root, 11);
        let err = mcts.best_next_state(0).unwrap_err();
        assert!(matches!(err, MctsError::NoChildren));
    }

    #[test]
    fn test_terminal_root_steps_without_children() {
        let mut mcts = engine(Chain(0), 5);

        for steps in 1..=3 {
            mcts.step().unwrap();
            assert_eq!(mcts.arena().len(), 1);
            assert_eq!(mcts.arena().root().unwrap().n(), steps);
        }

        let err = mcts.best_next_state(10).unwrap_err();
        assert!(matches!(err, MctsError::NoChildren));
    }

    #[test]
    fn test_with_arena_rejects_empty() {
        let arena: Arena<Chain> = Arena::new();
        let err = Mcts::with_arena(
            SearchConfig::default(),
            arena,
            ChaCha8Rng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(err, MctsError::EmptyTree));
    }

    /// Modeling bug: claims non-terminal but produces no successors.
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Broken;

    impl State for Broken {
        fn next_states(&self) -> Vec<Self> {
            Vec::new()
        }

        fn is_terminal(&self) -> bool {
            false
        }

        fn reward(&self) -> Result<f64> {
            self.require_terminal()?;
            Ok(0.0)
        }
    }

    #[test]
    fn test_stuck_rollout_is_an_error() {
        let mut mcts = engine(Broken, 1);
        let err = mcts.step().unwrap_err();
        assert!(matches!(err, MctsError::InvalidState(_)));
    }

    #[test]
    fn test_uct_and_ucb_both_search() {
        for policy in [TreePolicy::Uct, TreePolicy::Ucb] {
            let mut mcts = Mcts::from_root(
                SearchConfig::with_policy(policy),
                Bandit::Root,
                ChaCha8Rng::seed_from_u64(9),
            );
            assert_eq!(mcts.best_next_state(50).unwrap(), Bandit::Arm(1));
        }
    }
}
