//! Keyed data join.
//!
//! A [`BindingSet`] keeps one scene node per data key inside a container.
//! Each [`BindingSet::refresh`] diffs the new data against the bound keys and
//! hands every key to exactly one of the enter, update or exit callbacks.
//!
//! Callback errors are returned as-is and nothing is rolled back: the set
//! reflects whatever work completed before the failure.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::SceneError;
use crate::scene::{Attr, AttrValue, NodeId, ShapeKind, Surface};
use crate::transitions::TransitionConfig;

/// Positional key function, for data without a natural identity.
pub fn by_index<D>(index: usize, _datum: &D) -> usize {
    index
}

/// An element handed to a join callback.
pub struct Bound<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    node: NodeId,
    transition: Option<TransitionConfig>,
}

impl<'a, S: Surface + ?Sized> Bound<'a, S> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The transition of the current refresh, if it has one.
    pub fn transition(&self) -> Option<TransitionConfig> {
        self.transition
    }

    /// Set an attribute immediately.
    pub fn set(&mut self, attr: Attr, value: impl Into<AttrValue>) -> Result<&mut Self, SceneError> {
        self.surface.set_attr(self.node, attr, value.into())?;
        Ok(self)
    }

    /// Move an attribute to `value` using the refresh's transition, or set it
    /// immediately when the refresh has none.
    pub fn animate(
        &mut self,
        attr: Attr,
        value: impl Into<AttrValue>,
    ) -> Result<&mut Self, SceneError> {
        match self.transition {
            Some(config) => self
                .surface
                .transition_attr(self.node, attr, value.into(), config)?,
            None => self.surface.set_attr(self.node, attr, value.into())?,
        }
        Ok(self)
    }

    /// Direct access to the surface, e.g. to append child nodes.
    pub fn surface(&mut self) -> &mut S {
        self.surface
    }
}

/// Keys handled by one refresh, per partition, in the order they were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReport<K> {
    pub entered: Vec<K>,
    pub updated: Vec<K>,
    pub exited: Vec<K>,
}

impl<K> Default for JoinReport<K> {
    fn default() -> Self {
        Self {
            entered: Vec::new(),
            updated: Vec::new(),
            exited: Vec::new(),
        }
    }
}

/// Live association between data keys and the nodes drawn for them.
#[derive(Debug, Clone)]
pub struct BindingSet<K> {
    container: NodeId,
    shape: ShapeKind,
    entries: HashMap<K, NodeId>,
    /// Keys in the order of the most recent data.
    order: Vec<K>,
}

impl<K: Eq + Hash + Clone> BindingSet<K> {
    /// Bind `shape` nodes inside `container`. The set starts empty.
    pub fn new(container: NodeId, shape: ShapeKind) -> Self {
        Self {
            container,
            shape,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound keys in data order.
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    pub fn get(&self, key: &K) -> Option<NodeId> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Key bound to `node`, if any.
    pub fn key_of(&self, node: NodeId) -> Option<&K> {
        self.entries
            .iter()
            .find_map(|(key, bound)| (*bound == node).then_some(key))
    }

    /// `(key, node)` pairs in data order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, NodeId)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|node| (key, *node)))
    }

    /// Bring the bound nodes in line with `data`.
    ///
    /// * keys new to the set get a fresh node and go through `enter`
    /// * keys already bound go through `update`
    /// * keys no longer present go through `exit`, are evicted and their node
    ///   is retired (removed once any exit transition finishes)
    ///
    /// A node whose `enter` fails is discarded on the spot and its key stays
    /// unbound.
    ///
    /// Exits run first in previous order, then enters and updates in `data`
    /// order. When `data` repeats a key, its last occurrence wins.
    #[allow(clippy::too_many_arguments)]
    pub fn refresh<D, S, E, KF, EnF, UpF, ExF>(
        &mut self,
        surface: &mut S,
        data: &[D],
        key_fn: KF,
        mut enter: EnF,
        mut update: UpF,
        mut exit: ExF,
        transition: Option<TransitionConfig>,
    ) -> Result<JoinReport<K>, E>
    where
        S: Surface + ?Sized,
        E: From<SceneError>,
        KF: Fn(usize, &D) -> K,
        EnF: FnMut(&mut Bound<'_, S>, &D) -> Result<(), E>,
        UpF: FnMut(&mut Bound<'_, S>, &D) -> Result<(), E>,
        ExF: FnMut(&mut Bound<'_, S>) -> Result<(), E>,
    {
        let next = dedup_keys(data, &key_fn);
        let next_keys: HashSet<&K> = next.iter().map(|(key, _)| key).collect();

        let exiting: Vec<K> = self
            .order
            .iter()
            .filter(|key| !next_keys.contains(key))
            .cloned()
            .collect();

        log::debug!(
            "[join] container {}: {} items, {} bound, {} exiting",
            self.container,
            next.len(),
            self.entries.len(),
            exiting.len()
        );

        let mut report = JoinReport::default();

        for key in exiting {
            let Some(node) = self.entries.remove(&key) else {
                continue;
            };
            self.order.retain(|k| *k != key);

            let result = exit(&mut Bound {
                surface: &mut *surface,
                node,
                transition,
            });
            retire_quietly(surface, node)?;
            result?;
            report.exited.push(key);
        }

        let (entering, updating): (Vec<_>, Vec<_>) = next
            .iter()
            .partition(|(key, _)| !self.entries.contains_key(key));

        for (key, index) in entering {
            let node = surface.append(self.container, self.shape)?;
            let mut bound = Bound {
                surface: &mut *surface,
                node,
                transition,
            };
            if let Err(err) = enter(&mut bound, &data[*index]) {
                // Never bound, so there is nothing to animate out.
                discard_quietly(surface, node)?;
                return Err(err);
            }
            self.entries.insert(key.clone(), node);
            self.order.push(key.clone());
            report.entered.push(key.clone());
        }

        for (key, index) in updating {
            let Some(node) = self.entries.get(key).copied() else {
                continue;
            };
            update(
                &mut Bound {
                    surface: &mut *surface,
                    node,
                    transition,
                },
                &data[*index],
            )?;
            report.updated.push(key.clone());
        }

        self.order = next.into_iter().map(|(key, _)| key).collect();

        log::debug!(
            "[join] container {}: entered={} updated={} exited={}",
            self.container,
            report.entered.len(),
            report.updated.len(),
            report.exited.len()
        );

        Ok(report)
    }
}

/// Keys of `data` with their index, one entry per distinct key, positioned at
/// the key's last occurrence.
fn dedup_keys<D, K, KF>(data: &[D], key_fn: &KF) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    KF: Fn(usize, &D) -> K,
{
    let keys: Vec<K> = data
        .iter()
        .enumerate()
        .map(|(i, datum)| key_fn(i, datum))
        .collect();

    let mut last: HashMap<&K, usize> = HashMap::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        last.insert(key, i);
    }

    keys.iter()
        .enumerate()
        .filter(|(i, key)| last.get(key) == Some(i))
        .map(|(i, key)| (key.clone(), i))
        .collect()
}

/// Retire a node, tolerating one that is already gone.
fn retire_quietly<S: Surface + ?Sized>(surface: &mut S, node: NodeId) -> Result<(), SceneError> {
    match surface.retire(node) {
        Err(SceneError::UnknownNode(_)) => Ok(()),
        other => other,
    }
}

fn discard_quietly<S: Surface + ?Sized>(surface: &mut S, node: NodeId) -> Result<(), SceneError> {
    match surface.discard(node) {
        Err(SceneError::UnknownNode(_)) => Ok(()),
        other => other,
    }
}
