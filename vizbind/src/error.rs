//! Error types

use crate::scene::NodeId;

/// Errors raised by scene operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The node does not exist (never created, or already removed).
    #[error("Node {0} not found in scene")]
    UnknownNode(NodeId),

    /// Children can only be appended to group nodes.
    #[error("Node {0} is not a container")]
    NotAContainer(NodeId),

    /// The scene root cannot be removed.
    #[error("The scene root cannot be retired")]
    RootNode,
}
