//! Retained scene graph the binding engine draws into.
//!
//! A [`Scene`] is a tree of primitive shapes with named attributes. Attribute
//! writes either land immediately or start a transition that is sampled
//! against the scene's logical clock, which only moves when [`Scene::tick`]
//! is called. Hosts drive the clock from their frame loop; tests drive it
//! by hand.

mod attr;
mod node;

use std::collections::HashMap;
use std::time::Instant;

pub use attr::{Attr, AttrValue, ShapeKind};
pub use node::NodeId;
use node::Node;

use crate::animation::AnimationState;
use crate::error::SceneError;
use crate::transitions::TransitionConfig;

/// The drawing capabilities the binding engine relies on.
pub trait Surface {
    /// Create a node of `kind` as the last child of `parent`.
    fn append(&mut self, parent: NodeId, kind: ShapeKind) -> Result<NodeId, SceneError>;

    /// Set an attribute immediately, superseding any transition on it.
    fn set_attr(&mut self, node: NodeId, attr: Attr, value: AttrValue) -> Result<(), SceneError>;

    /// Move an attribute towards `value` over `config.duration`.
    fn transition_attr(
        &mut self,
        node: NodeId,
        attr: Attr,
        value: AttrValue,
        config: TransitionConfig,
    ) -> Result<(), SceneError>;

    /// Remove a node, waiting for its running transitions to finish first.
    fn retire(&mut self, node: NodeId) -> Result<(), SceneError>;

    /// Remove a node right away, dropping any transitions it has running.
    fn discard(&mut self, node: NodeId) -> Result<(), SceneError>;
}

/// In-memory [`Surface`] with a logical animation clock.
#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    animation: AnimationState,
    now: Instant,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_clock(Instant::now())
    }

    /// Create a scene whose clock starts at `now`.
    pub fn with_clock(now: Instant) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeId::ROOT, Node::new(ShapeKind::Group, None));
        Self {
            nodes,
            next_id: 1,
            animation: AnimationState::new(),
            now,
        }
    }

    /// Current value of the logical clock.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Advance the clock, settle finished transitions and drop retired nodes
    /// that are no longer animating. The clock never moves backwards.
    pub fn tick(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
        self.animation.prune(self.now);

        let settled: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(id, node)| node.retired && !self.animation.is_animating(**id))
            .map(|(id, _)| *id)
            .collect();
        for id in settled {
            self.remove(id);
        }
    }

    /// Enable or disable reduced motion. Transitions then apply instantly.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animation.set_reduced_motion(enabled);
        if enabled {
            self.tick(self.now);
        }
    }

    pub fn has_active_transitions(&self) -> bool {
        self.animation.has_active_transitions()
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// True while the node exists, including while it is retiring.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn is_retired(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.retired)
    }

    /// Number of nodes, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self, node: NodeId) -> Option<ShapeKind> {
        self.nodes.get(&node).map(|n| n.kind)
    }

    /// Live (not retiring) children of `node`, in insertion order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|child| !self.is_retired(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Direct children of `node` in paint order, including nodes that are
    /// still transitioning out.
    pub fn all_children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Displayed value of an attribute at the current clock.
    pub fn attr(&self, node: NodeId, attr: Attr) -> Option<AttrValue> {
        let stored = self.nodes.get(&node)?.attrs.get(&attr)?;
        Some(
            self.animation
                .get_interpolated(node, attr, self.now)
                .unwrap_or_else(|| stored.clone()),
        )
    }

    /// Displayed numeric attribute, if set and numeric.
    pub fn number(&self, node: NodeId, attr: Attr) -> Option<f64> {
        self.attr(node, attr).and_then(|v| v.as_number())
    }

    /// Value an attribute will have once its transition settles.
    pub fn target(&self, node: NodeId, attr: Attr) -> Option<&AttrValue> {
        self.nodes.get(&node)?.attrs.get(&attr)
    }

    /// Remove every child of `node` immediately, without transitions.
    /// Used for one-shot drawings such as axes and legends.
    pub fn clear(&mut self, node: NodeId) -> Result<(), SceneError> {
        let children = self
            .nodes
            .get(&node)
            .ok_or(SceneError::UnknownNode(node))?
            .children
            .clone();
        for child in children {
            self.remove(child);
        }
        Ok(())
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))
    }

    fn remove(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.remove(&node) else {
            return;
        };
        log::trace!("[scene] removed {node}");
        self.animation.forget(node);

        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        for child in removed.children {
            self.remove(child);
        }
    }
}

impl Surface for Scene {
    fn append(&mut self, parent: NodeId, kind: ShapeKind) -> Result<NodeId, SceneError> {
        let id = NodeId(self.next_id);
        let container = self.node_mut(parent)?;
        if !container.kind.is_container() {
            return Err(SceneError::NotAContainer(parent));
        }
        container.children.push(id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(kind, Some(parent)));
        Ok(id)
    }

    fn set_attr(&mut self, node: NodeId, attr: Attr, value: AttrValue) -> Result<(), SceneError> {
        let n = self.node_mut(node)?;
        if n.retired {
            return Ok(());
        }
        n.attrs.insert(attr, value);
        self.animation.cancel(node, attr);
        Ok(())
    }

    fn transition_attr(
        &mut self,
        node: NodeId,
        attr: Attr,
        value: AttrValue,
        config: TransitionConfig,
    ) -> Result<(), SceneError> {
        let now = self.now;
        let n = self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))?;
        if n.retired {
            return Ok(());
        }

        // Nothing to interpolate from: the target applies right away.
        let Some(prev) = n.attrs.insert(attr, value.clone()) else {
            return Ok(());
        };
        if prev == value {
            return Ok(());
        }

        self.animation.start(node, attr, &prev, &value, config, now);
        Ok(())
    }

    fn retire(&mut self, node: NodeId) -> Result<(), SceneError> {
        if node == NodeId::ROOT {
            return Err(SceneError::RootNode);
        }
        let animating = self.animation.is_animating(node);
        self.node_mut(node)?.retired = true;
        if !animating {
            self.remove(node);
        }
        Ok(())
    }

    fn discard(&mut self, node: NodeId) -> Result<(), SceneError> {
        if node == NodeId::ROOT {
            return Err(SceneError::RootNode);
        }
        if !self.nodes.contains_key(&node) {
            return Err(SceneError::UnknownNode(node));
        }
        self.remove(node);
        Ok(())
    }
}
