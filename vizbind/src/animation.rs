use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::scene::{Attr, AttrValue, NodeId};
use crate::transitions::{Easing, TransitionConfig};
use crate::types::Color;

/// A single active transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: AttrValue,
    to: AttrValue,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl ActiveTransition {
    fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    fn value_at(&self, now: Instant) -> AttrValue {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        if progress >= 1.0 {
            return self.to.clone();
        }
        interpolate(&self.from, &self.to, self.easing.apply(progress))
    }
}

/// Tracks in-flight attribute transitions for every node of a scene.
///
/// There is at most one transition per `(node, attribute)`. Starting a new one
/// replaces the old and begins from wherever the old one currently is, so the
/// most recent target always wins.
#[derive(Debug, Default)]
pub struct AnimationState {
    active: HashMap<(NodeId, Attr), ActiveTransition>,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    /// When enabled, all transitions complete instantly.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Returns true if any transition is currently active.
    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    /// Returns true if any attribute of `node` is still transitioning.
    pub fn is_animating(&self, node: NodeId) -> bool {
        self.active.keys().any(|(id, _)| *id == node)
    }

    /// Number of running transitions.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Start moving `attr` of `node` from `prev` to `to`.
    ///
    /// When a transition is already running for the same attribute it is
    /// superseded and the new one starts from its interpolated value.
    /// Returns false (and drops any running transition) if the value should
    /// simply be applied: reduced motion, zero duration, or a value that
    /// cannot be interpolated.
    pub fn start(
        &mut self,
        node: NodeId,
        attr: Attr,
        prev: &AttrValue,
        to: &AttrValue,
        config: TransitionConfig,
        now: Instant,
    ) -> bool {
        let key = (node, attr);

        if self.reduced_motion || config.duration.is_zero() || !can_interpolate(prev, to) {
            self.active.remove(&key);
            return false;
        }

        // Transition from current interpolated value
        let from = match self.active.get(&key) {
            Some(existing) => existing.value_at(now),
            None => prev.clone(),
        };

        log::trace!(
            "[anim] {node} {attr:?}: {from:?} -> {to:?} over {:?}",
            config.duration
        );

        self.active.insert(
            key,
            ActiveTransition {
                from,
                to: to.clone(),
                start: now,
                duration: config.duration,
                easing: config.easing,
            },
        );
        true
    }

    /// Stop the transition of one attribute, if any.
    pub fn cancel(&mut self, node: NodeId, attr: Attr) {
        self.active.remove(&(node, attr));
    }

    /// Get interpolated value for an attribute.
    /// Returns None if no active transition for this attribute.
    pub fn get_interpolated(&self, node: NodeId, attr: Attr, now: Instant) -> Option<AttrValue> {
        self.active
            .get(&(node, attr))
            .map(|transition| transition.value_at(now))
    }

    /// Drop transitions that have reached their target.
    pub fn prune(&mut self, now: Instant) {
        self.active.retain(|_, transition| !transition.finished(now));
    }

    /// Remove every transition belonging to `node`.
    pub fn forget(&mut self, node: NodeId) {
        self.active.retain(|(id, _), _| *id != node);
    }
}

fn can_interpolate(from: &AttrValue, to: &AttrValue) -> bool {
    matches!(
        (from, to),
        (AttrValue::Number(_), AttrValue::Number(_)) | (AttrValue::Color(_), AttrValue::Color(_))
    )
}

fn interpolate(from: &AttrValue, to: &AttrValue, t: f32) -> AttrValue {
    match (from, to) {
        (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(lerp(*a, *b, t as f64)),
        (AttrValue::Color(a), AttrValue::Color(b)) => AttrValue::Color(lerp_color(a, b, t)),
        _ => to.clone(), // Mismatched types, just use target
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate colors in OKLCH space.
pub fn lerp_color(from: &Color, to: &Color, t: f32) -> Color {
    let (from_l, from_c, from_h) = from.to_oklch();
    let (to_l, to_c, to_h) = to.to_oklch();

    // Interpolate L and C linearly
    let l = from_l + (to_l - from_l) * t;
    let c = from_c + (to_c - from_c) * t;

    // Hue interpolation (shortest path around the circle)
    let mut dh = to_h - from_h;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }
    let h = (from_h + dh * t).rem_euclid(360.0);

    Color::oklch(l, c, h)
}
