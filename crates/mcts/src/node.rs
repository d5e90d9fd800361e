//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler
//! memory management.

use canopy_core::State;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Handle for a raw arena index.
    ///
    /// The index is not checked here; arena operations reject a handle
    /// that does not refer to an existing node.
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// The raw arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the search tree.
///
/// Each node wraps exactly one domain state plus the statistics
/// accumulated for it during search. The state is immutable after
/// creation; only `n` and `q` change, and only during backpropagation.
#[derive(Clone, Debug)]
pub struct Node<S: State> {
    state: S,

    /// Number of times this node was visited during search.
    n: u32,

    /// Cumulative (not averaged) reward from all visits.
    q: f64,

    parent: Option<NodeId>,
    children: Vec<NodeId>,

    /// Successor states not yet materialized as child nodes.
    ///
    /// Computed from `state.next_states()` exactly once, on the first
    /// expansion attempt, and never recomputed: the state is immutable,
    /// so the cache needs no invalidation.
    remaining: Option<Vec<S>>,
}

impl<S: State> Node<S> {
    pub(crate) fn new(state: S, parent: Option<NodeId>) -> Self {
        Self {
            state,
            n: 0,
            q: 0.0,
            parent,
            children: Vec::new(),
            remaining: None,
        }
    }

    /// The domain state this node wraps.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Visit count.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Cumulative reward.
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Parent index, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Indices of the children materialized so far.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True once every successor has been materialized as a child.
    ///
    /// Also true for terminal leaves, whose successor set is empty. A
    /// node whose cache has not been materialized yet reads as not
    /// expanded.
    pub fn is_expanded(&self) -> bool {
        self.remaining.as_ref().map_or(false, |r| r.is_empty())
    }

    /// Successor cache, materialized on first access.
    pub(crate) fn remaining_mut(&mut self) -> &mut Vec<S> {
        if self.remaining.is_none() {
            self.remaining = Some(self.state.next_states());
        }
        self.remaining
            .as_mut()
            .expect("BUG: successor cache just materialized")
    }

    pub(crate) fn link_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn record_visit(&mut self, delta: f64) {
        self.n += 1;
        self.q += delta;
    }
}

/// Node equality ignores the successor cache: two nodes built from the
/// same state and statistics are equal whether or not either has been
/// touched by expansion.
impl<S: State> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.n == other.n
            && self.q == other.q
            && self.parent == other.parent
            && self.children == other.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::TicTacToeState;

    #[test]
    fn test_root_node_defaults() {
        let node = Node::new(TicTacToeState::new(), None);
        assert_eq!(node.n(), 0);
        assert_eq!(node.q(), 0.0);
        assert_eq!(node.parent(), None);
        assert!(node.children().is_empty());
        assert!(!node.is_expanded());
    }

    #[test]
    fn test_cache_materializes_once() {
        let mut node = Node::new(TicTacToeState::new(), None);

        assert_eq!(node.remaining_mut().len(), 9);
        node.remaining_mut().pop();

        // A second access must not recompute the successor set.
        assert_eq!(node.remaining_mut().len(), 8);
        assert!(!node.is_expanded());
    }

    #[test]
    fn test_expanded_after_cache_drained() {
        let mut node = Node::new(TicTacToeState::new(), None);
        node.remaining_mut().clear();
        assert!(node.is_expanded());
    }

    #[test]
    fn test_terminal_leaf_is_expanded_once_materialized() {
        let state: TicTacToeState = "XXXOO....".try_into().unwrap();
        let mut node = Node::new(state, None);

        assert!(!node.is_expanded());
        assert!(node.remaining_mut().is_empty());
        assert!(node.is_expanded());
    }

    #[test]
    fn test_equality_ignores_cache() {
        let mut a = Node::new(TicTacToeState::new(), None);
        let b = Node::new(TicTacToeState::new(), None);

        a.remaining_mut();
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_visit_accumulates() {
        let mut node = Node::new(TicTacToeState::new(), None);
        node.record_visit(1.0);
        node.record_visit(-0.5);

        assert_eq!(node.n(), 2);
        assert!((node.q() - 0.5).abs() < 1e-12);
    }
}
