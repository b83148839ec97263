//! Scatter plot with add, remove and jitter controls.
//!
//! Points have no identity of their own, so they are bound by position:
//! removing the last point exits the last circle, and jitter updates every
//! circle in place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vizbind::scale::LinearScale;
use vizbind::{by_index, Attr, BindingSet, Color, Key, Scene, ShapeKind};

use crate::config::{LabConfig, Margin};
use crate::context::ChartContext;
use crate::data::ScatterPoint;
use crate::draw;
use crate::error::LabError;
use crate::labs::Lab;

/// Both axes span this data range.
pub const DOMAIN: (f64, f64) = (0.0, 100.0);
/// Largest offset applied by a jitter, in data units.
pub const JITTER: f64 = 5.0;
const RADIUS: f64 = 5.0;

pub fn default_config() -> LabConfig {
    LabConfig::new(600.0, 400.0).margin(Margin::new(40.0, 40.0, 40.0, 60.0))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScatterEvent {
    Add(ScatterPoint),
    RemoveLast,
    /// Per-point `(dx, dy)` offsets, matched to points by position.
    Jitter(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterState {
    pub points: Vec<ScatterPoint>,
}

impl ScatterState {
    pub fn new(points: Vec<ScatterPoint>) -> Self {
        Self { points }
    }

    pub fn reduce(mut self, event: ScatterEvent) -> Self {
        match event {
            ScatterEvent::Add(point) => self.points.push(point),
            ScatterEvent::RemoveLast => {
                self.points.pop();
            }
            ScatterEvent::Jitter(offsets) => {
                for (point, (dx, dy)) in self.points.iter_mut().zip(offsets) {
                    point.x += dx;
                    point.y += dy;
                }
            }
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScatterScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

pub struct ScatterLab {
    config: LabConfig,
    state: ScatterState,
    chart: ChartContext<ScatterScales>,
    points: BindingSet<usize>,
    rng: StdRng,
}

impl ScatterLab {
    pub fn mount(
        scene: &mut Scene,
        config: LabConfig,
        points: Vec<ScatterPoint>,
    ) -> Result<Self, LabError> {
        let (width, height) = config.inner_size();
        let scales = ScatterScales {
            x: LinearScale::new(DOMAIN, (0.0, width)),
            y: LinearScale::new(DOMAIN, (height, 0.0)),
        };
        let chart = ChartContext::mount(scene, &config, scales)?;

        let axes = chart.layers.axes;
        draw::axis_bottom(scene, axes, &chart.scales.x, height, 10)?;
        draw::axis_left(scene, axes, &chart.scales.y, 0.0, 5)?;
        draw::label(
            scene,
            axes,
            "College Graduates",
            (width / 2.0, height + config.margin.bottom - 10.0),
            "middle",
        )?;
        draw::label(
            scene,
            axes,
            "Income (in $1000 dollars)",
            (-config.margin.left + 15.0, -config.margin.top / 2.0),
            "start",
        )?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            points: BindingSet::new(chart.layers.marks, ShapeKind::Circle),
            state: ScatterState::new(points),
            chart,
            config,
            rng,
        })
    }

    pub fn state(&self) -> &ScatterState {
        &self.state
    }

    pub fn points(&self) -> &BindingSet<usize> {
        &self.points
    }

    /// A new red point anywhere in the domain.
    pub fn random_point(&mut self) -> ScatterPoint {
        ScatterPoint::new(
            self.rng.random_range(DOMAIN.0..DOMAIN.1),
            self.rng.random_range(DOMAIN.0..DOMAIN.1),
            Color::rgb(255, 0, 0),
        )
    }

    /// One offset in `-JITTER..JITTER` per current point.
    pub fn random_offsets(&mut self) -> Vec<(f64, f64)> {
        (0..self.state.points.len())
            .map(|_| {
                (
                    self.rng.random_range(-JITTER..JITTER),
                    self.rng.random_range(-JITTER..JITTER),
                )
            })
            .collect()
    }
}

impl Lab for ScatterLab {
    type Event = ScatterEvent;

    fn config(&self) -> &LabConfig {
        &self.config
    }

    fn event_for_key(&mut self, key: Key) -> Option<ScatterEvent> {
        match key {
            Key::Char('a') => Some(ScatterEvent::Add(self.random_point())),
            Key::Char('r') => Some(ScatterEvent::RemoveLast),
            Key::Char('u') => Some(ScatterEvent::Jitter(self.random_offsets())),
            _ => None,
        }
    }

    fn handle(&mut self, event: ScatterEvent) {
        log::debug!("[scatter] {:?}", event);
        self.state = std::mem::take(&mut self.state).reduce(event);
    }

    fn render(&mut self, scene: &mut Scene) -> Result<(), LabError> {
        let scales = &self.chart.scales;

        self.points.refresh(
            scene,
            &self.state.points,
            by_index,
            |dot, point| -> Result<(), LabError> {
                dot.set(Attr::Cx, scales.x.map(point.x))?
                    .set(Attr::Cy, scales.y.map(point.y))?
                    .set(Attr::R, RADIUS)?
                    .set(Attr::Fill, point.color)?;
                Ok(())
            },
            |dot, point| {
                dot.animate(Attr::Cx, scales.x.map(point.x))?
                    .animate(Attr::Cy, scales.y.map(point.y))?
                    .animate(Attr::Fill, point.color)?;
                Ok(())
            },
            |_| Ok(()),
            self.config.transition_config(),
        )?;

        self.chart.caption(
            scene,
            format!("{} points  [a] add  [r] remove  [u] jitter", self.state.points.len()),
        )?;
        Ok(())
    }
}
