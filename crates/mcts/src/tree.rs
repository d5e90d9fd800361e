//! Arena-allocated search tree.
//!
//! Using a Vec<Node> with indices provides better cache locality and
//! simpler ownership compared to Rc<RefCell<Node>>. The arena is
//! append-only: nodes are never removed or reordered, so an index
//! handed out once stays valid for the arena's lifetime.

use std::fmt::Display;

use canopy_core::{MctsError, Result, State};

use crate::node::{Node, NodeId};

/// Append-only, index-addressed store of tree nodes.
///
/// Indices are assigned densely starting at 0 in creation order; index 0
/// is always the root. The arena is created empty or seeded with exactly
/// one root, and only ever grows by one node per successful
/// [`Arena::add_node`] call. A failed call leaves the arena untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena<S: State> {
    nodes: Vec<Node<S>>,
}

impl<S: State> Arena<S> {
    /// Create an empty arena with no root.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an arena seeded with exactly one root node.
    pub fn from_root_state(state: S) -> Self {
        let mut arena = Self::new();
        let id = arena
            .add_node(None, state)
            .expect("BUG: adding a root to an empty arena cannot fail");
        debug_assert_eq!(id, NodeId::ROOT);
        arena
    }

    /// Create an arena whose root is built from raw field values.
    ///
    /// # Errors
    /// Returns `MctsError::Construction` when the fields cannot build a
    /// valid state.
    pub fn try_from_root_fields<F>(fields: F) -> Result<Self>
    where
        S: TryFrom<F>,
        <S as TryFrom<F>>::Error: Display,
    {
        let state = construct_state(fields)?;
        Ok(Self::from_root_state(state))
    }

    /// Add a node wrapping `state` under `parent`, returning its index.
    ///
    /// With `parent == None` the node becomes the root, which succeeds
    /// only on an empty arena. The returned index equals the node count
    /// before insertion.
    ///
    /// # Errors
    /// - `MctsError::RootConflict` for a rootless add on a non-empty
    ///   arena.
    /// - `MctsError::UnknownParent` when `parent` is not an existing
    ///   index.
    ///
    /// Neither failure mutates the arena.
    pub fn add_node(&mut self, parent: Option<NodeId>, state: S) -> Result<NodeId> {
        match parent {
            None if !self.nodes.is_empty() => return Err(MctsError::RootConflict),
            Some(p) if p.0 >= self.nodes.len() => return Err(MctsError::UnknownParent(p.0)),
            _ => {}
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, parent));
        if let Some(p) = parent {
            self.nodes[p.0].link_child(id);
        }
        Ok(id)
    }

    /// Add a node whose state is built from raw field values.
    ///
    /// The state is constructed before any structural check, so an
    /// invalid parent and invalid fields both leave the arena untouched.
    ///
    /// # Errors
    /// `MctsError::Construction` when the fields cannot build a valid
    /// state, plus the failures of [`Arena::add_node`].
    pub fn try_add_node<F>(&mut self, parent: Option<NodeId>, fields: F) -> Result<NodeId>
    where
        S: TryFrom<F>,
        <S as TryFrom<F>>::Error: Display,
    {
        let state = construct_state(fields)?;
        self.add_node(parent, state)
    }

    /// The root node.
    ///
    /// # Errors
    /// `MctsError::EmptyTree` when the arena has no nodes.
    pub fn root(&self) -> Result<&Node<S>> {
        self.nodes.first().ok_or(MctsError::EmptyTree)
    }

    /// Every node with no recorded children, in index order.
    ///
    /// This is a structural notion ("has no child yet"): unexpanded
    /// internal nodes qualify just like game-theoretic terminal leaves.
    pub fn leaves(&self) -> Vec<(NodeId, &Node<S>)> {
        self.iter()
            .filter(|(_, node)| node.children().is_empty())
            .collect()
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Get the number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds no nodes (not even a root).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ix, node)| (NodeId(ix), node))
    }
}

impl<S: State> Default for Arena<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn construct_state<S, F>(fields: F) -> Result<S>
where
    S: TryFrom<F>,
    <S as TryFrom<F>>::Error: Display,
{
    S::try_from(fields).map_err(|e| MctsError::Construction(e.to_string()))
}
