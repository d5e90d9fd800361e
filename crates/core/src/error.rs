use thiserror::Error;

/// Errors that can occur while building or searching a tree.
///
/// Every variant is a local fault: nothing is retried internally, and a
/// failed mutation never leaves the tree in a partially updated state.
#[derive(Error, Debug)]
pub enum MctsError {
    #[error("there can only be one root node")]
    RootConflict,

    #[error("parent node ({0}) does not exist")]
    UnknownParent(usize),

    #[error("cannot construct state: {0}")]
    Construction(String),

    #[error("tree has no nodes")]
    EmptyTree,

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("root node has no children")]
    NoChildren,
}

/// Convenience Result type for tree and search operations
pub type Result<T> = std::result::Result<T, MctsError>;
