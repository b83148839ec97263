use std::collections::HashMap;
use std::fmt;

use super::{Attr, AttrValue, ShapeKind};

/// Handle to a node in a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// The scene root. Always present, always a group.
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: ShapeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Target values. The displayed value may still be transitioning.
    pub attrs: HashMap<Attr, AttrValue>,
    /// Scheduled for removal once its transitions settle.
    pub retired: bool,
}

impl Node {
    pub fn new(kind: ShapeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attrs: HashMap::new(),
            retired: false,
        }
    }
}
