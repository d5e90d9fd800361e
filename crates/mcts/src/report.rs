//! Diagnostic records for external tree rendering.
//!
//! Visualization itself lives outside this crate; it consumes these
//! fixed-shape records after search completes instead of reaching into
//! arena internals. The per-node score uses the session's tree policy
//! at `c = 0`, the same formula the search itself applies.

use canopy_core::State;
use rand::Rng;

use crate::{node::NodeId, policy::TreePolicy, search::Mcts, tree::Arena};

/// Statistics for one node, sufficient to label it in a rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeReport {
    pub id: NodeId,

    /// Cumulative reward.
    pub q: f64,

    /// Visit count.
    pub n: u32,

    /// Pure-exploitation policy score relative to the parent.
    ///
    /// `None` for the root (no parent to score against) and for a node
    /// that was never visited.
    pub policy_score: Option<f64>,
}

/// Finalized node and edge data for one search session.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeReport {
    /// One record per node, in index order.
    pub nodes: Vec<NodeReport>,

    /// Parent to child adjacency, one entry per edge.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl TreeReport {
    /// Build a report over a finalized arena, scoring each node with
    /// `policy` at `c = 0`.
    pub fn new<S: State>(arena: &Arena<S>, policy: TreePolicy) -> Self {
        let nodes = arena
            .iter()
            .map(|(id, node)| {
                let policy_score = node.parent().filter(|_| node.n() >= 1).map(|parent| {
                    let n_parent = arena.get(parent).n();
                    policy.score(node.q(), node.n(), n_parent, 0.0)
                });
                NodeReport {
                    id,
                    q: node.q(),
                    n: node.n(),
                    policy_score,
                }
            })
            .collect();

        let edges = arena
            .iter()
            .flat_map(|(id, node)| node.children().iter().map(move |&child| (id, child)))
            .collect();

        Self { nodes, edges }
    }
}

impl<S: State, R: Rng> Mcts<S, R> {
    /// Report the session's tree with the configured policy.
    pub fn report(&self) -> TreeReport {
        TreeReport::new(self.arena(), self.config().tree_policy)
    }
}
