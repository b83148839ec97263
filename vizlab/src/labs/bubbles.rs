//! Gapminder bubble chart.
//!
//! One bubble per country for the selected year. The axis and size
//! variables are switchable; their scales always span the whole dataset so
//! bubbles stay comparable across years. The bubble under the pointer gets
//! a black outline and its values replace the caption.

use vizbind::scale::{extent_max, scheme_set2, LinearScale, OrdinalScale, SqrtScale};
use vizbind::{Attr, BindingSet, Color, Key, NodeId, Scene, ShapeKind};

use crate::config::{LabConfig, Margin};
use crate::context::ChartContext;
use crate::data::{CountryYear, Variable};
use crate::draw;
use crate::error::LabError;
use crate::labs::Lab;

pub const CONTINENTS: [&str; 5] = ["Africa", "Asia", "Oceania", "Americas", "Europe"];
pub const DEFAULT_YEAR: i32 = 2000;
/// Bubble radius range for the size variable.
pub const RADIUS: (f64, f64) = (5.0, 20.0);
const OPACITY: f64 = 0.5;
/// Outline of the bubble under the pointer.
pub const HOVER_STROKE: f64 = 4.0;

pub fn default_config() -> LabConfig {
    LabConfig::new(800.0, 600.0)
        .margin(Margin::new(80.0, 60.0, 60.0, 100.0))
        .transition(std::time::Duration::from_millis(1000))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubblesEvent {
    SetYear(i32),
    /// Move the year by this many steps.
    StepYear(i32),
    SetX(Variable),
    SetY(Variable),
    SetSize(Variable),
    CycleX,
    CycleY,
    CycleSize,
    /// Country under the pointer, if any.
    Hover(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubblesState {
    pub year: i32,
    /// Inclusive year extent of the dataset.
    pub years: (i32, i32),
    pub x: Variable,
    pub y: Variable,
    pub size: Variable,
    pub hovered: Option<String>,
}

impl BubblesState {
    pub fn new(years: (i32, i32)) -> Self {
        Self {
            year: DEFAULT_YEAR.clamp(years.0, years.1),
            years,
            x: Variable::Income,
            y: Variable::LifeExp,
            size: Variable::Population,
            hovered: None,
        }
    }

    /// State for `data`, whose years bound the slider.
    pub fn for_data(data: &[CountryYear]) -> Self {
        let years = data.iter().map(|d| d.year);
        let min = years.clone().min().unwrap_or(DEFAULT_YEAR);
        let max = years.max().unwrap_or(DEFAULT_YEAR);
        Self::new((min, max))
    }

    pub fn reduce(self, event: BubblesEvent) -> Self {
        let (first, last) = self.years;
        let clamp = |year: i32| year.clamp(first, last);
        match event {
            BubblesEvent::SetYear(year) => Self {
                year: clamp(year),
                ..self
            },
            BubblesEvent::StepYear(delta) => Self {
                year: clamp(self.year.saturating_add(delta)),
                ..self
            },
            BubblesEvent::SetX(x) => Self { x, ..self },
            BubblesEvent::SetY(y) => Self { y, ..self },
            BubblesEvent::SetSize(size) => Self { size, ..self },
            BubblesEvent::CycleX => Self {
                x: self.x.next(),
                ..self
            },
            BubblesEvent::CycleY => Self {
                y: self.y.next(),
                ..self
            },
            BubblesEvent::CycleSize => Self {
                size: self.size.next(),
                ..self
            },
            BubblesEvent::Hover(hovered) => Self { hovered, ..self },
        }
    }

    pub fn variables(&self) -> (Variable, Variable, Variable) {
        (self.x, self.y, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct BubbleScales {
    /// Variables the scales were computed for.
    pub variables: (Variable, Variable, Variable),
    pub x: LinearScale,
    pub y: LinearScale,
    pub size: SqrtScale,
    pub color: OrdinalScale,
}

impl BubbleScales {
    pub fn compute(data: &[CountryYear], state: &BubblesState, width: f64, height: f64) -> Self {
        let max = |variable: Variable| extent_max(data.iter().map(|d| d.value(variable))).unwrap_or(1.0);
        Self {
            variables: state.variables(),
            x: LinearScale::new((0.0, max(state.x)), (0.0, width)),
            y: LinearScale::new((0.0, max(state.y)), (height, 0.0)),
            size: SqrtScale::new((0.0, max(state.size)), RADIUS),
            color: OrdinalScale::new(CONTINENTS, scheme_set2()),
        }
    }
}

pub struct BubblesLab {
    config: LabConfig,
    data: Vec<CountryYear>,
    state: BubblesState,
    chart: ChartContext<BubbleScales>,
    bubbles: BindingSet<String>,
}

impl BubblesLab {
    pub fn mount(
        scene: &mut Scene,
        config: LabConfig,
        data: Vec<CountryYear>,
    ) -> Result<Self, LabError> {
        let state = BubblesState::for_data(&data);
        let (width, height) = config.inner_size();
        let scales = BubbleScales::compute(&data, &state, width, height);
        let chart = ChartContext::mount(scene, &config, scales)?;

        let entries: Vec<_> = CONTINENTS
            .iter()
            .map(|c| (c.to_string(), chart.scales.color.map(c)))
            .collect();
        draw::legend(scene, chart.layers.legend, &entries, (100.0, -config.margin.top / 2.0), 110.0)?;

        log::debug!(
            "[bubbles] {} records, years {}..={}",
            data.len(),
            state.years.0,
            state.years.1
        );

        let lab = Self {
            bubbles: BindingSet::new(chart.layers.marks, ShapeKind::Circle),
            config,
            data,
            state,
            chart,
        };
        lab.draw_axes(scene)?;
        Ok(lab)
    }

    pub fn state(&self) -> &BubblesState {
        &self.state
    }

    pub fn scales(&self) -> &BubbleScales {
        &self.chart.scales
    }

    pub fn bubbles(&self) -> &BindingSet<String> {
        &self.bubbles
    }

    fn draw_axes(&self, scene: &mut Scene) -> Result<(), LabError> {
        let axes = self.chart.layers.axes;
        let (width, height) = (self.chart.width, self.chart.height);
        let margin = self.config.margin;

        scene.clear(axes)?;
        draw::axis_bottom(scene, axes, &self.chart.scales.x, height, 10)?;
        draw::axis_left(scene, axes, &self.chart.scales.y, 0.0, 10)?;
        draw::label(
            scene,
            axes,
            self.state.x.label(),
            (width / 2.0, height + margin.bottom - 20.0),
            "middle",
        )?;
        draw::label(
            scene,
            axes,
            self.state.y.label(),
            (-margin.left + 10.0, -15.0),
            "start",
        )?;
        Ok(())
    }

    /// Recompute scales and redraw the axes if a variable changed.
    fn sync_scales(&mut self, scene: &mut Scene) -> Result<(), LabError> {
        if self.chart.scales.variables == self.state.variables() {
            return Ok(());
        }
        log::debug!(
            "[bubbles] rescaling for x={:?} y={:?} size={:?}",
            self.state.x,
            self.state.y,
            self.state.size
        );
        self.chart.scales =
            BubbleScales::compute(&self.data, &self.state, self.chart.width, self.chart.height);
        self.draw_axes(scene)
    }
}

impl Lab for BubblesLab {
    type Event = BubblesEvent;

    fn config(&self) -> &LabConfig {
        &self.config
    }

    fn event_for_key(&mut self, key: Key) -> Option<BubblesEvent> {
        match key {
            Key::Left => Some(BubblesEvent::StepYear(-1)),
            Key::Right => Some(BubblesEvent::StepYear(1)),
            Key::Home => Some(BubblesEvent::SetYear(self.state.years.0)),
            Key::End => Some(BubblesEvent::SetYear(self.state.years.1)),
            Key::Char('x') => Some(BubblesEvent::CycleX),
            Key::Char('y') => Some(BubblesEvent::CycleY),
            Key::Char('s') => Some(BubblesEvent::CycleSize),
            _ => None,
        }
    }

    fn event_for_hover(&mut self, node: Option<NodeId>) -> Option<BubblesEvent> {
        let country = node.and_then(|node| self.bubbles.key_of(node)).cloned();
        (country != self.state.hovered).then_some(BubblesEvent::Hover(country))
    }

    fn handle(&mut self, event: BubblesEvent) {
        log::debug!("[bubbles] {:?}", event);
        self.state = self.state.clone().reduce(event);
    }

    fn render(&mut self, scene: &mut Scene) -> Result<(), LabError> {
        self.sync_scales(scene)?;

        let year = self.state.year;
        let current: Vec<&CountryYear> = self.data.iter().filter(|d| d.year == year).collect();
        let scales = &self.chart.scales;
        let (x, y, size) = scales.variables;
        let hovered = self.state.hovered.as_deref();
        let outline = |d: &CountryYear| {
            if hovered == Some(d.country.as_str()) {
                HOVER_STROKE
            } else {
                0.0
            }
        };

        let report = self.bubbles.refresh(
            scene,
            &current,
            |_, d| d.country.clone(),
            |bubble, d| -> Result<(), LabError> {
                bubble
                    .set(Attr::Cx, scales.x.map(d.value(x)))?
                    .set(Attr::Cy, scales.y.map(d.value(y)))?
                    .set(Attr::R, 0.0)?
                    .set(Attr::Fill, scales.color.map(&d.continent))?
                    .set(Attr::Opacity, OPACITY)?
                    .set(Attr::Stroke, Color::BLACK)?
                    .set(Attr::StrokeWidth, outline(*d))?
                    .animate(Attr::R, scales.size.map(d.value(size)))?;
                Ok(())
            },
            |bubble, d| {
                bubble
                    .animate(Attr::Cx, scales.x.map(d.value(x)))?
                    .animate(Attr::Cy, scales.y.map(d.value(y)))?
                    .animate(Attr::R, scales.size.map(d.value(size)))?
                    .set(Attr::StrokeWidth, outline(*d))?;
                Ok(())
            },
            |bubble| {
                bubble.animate(Attr::R, 0.0)?;
                Ok(())
            },
            self.config.transition_config(),
        )?;
        log::debug!(
            "[bubbles] year {}: +{} ~{} -{}",
            year,
            report.entered.len(),
            report.updated.len(),
            report.exited.len()
        );

        let details = hovered.and_then(|country| current.iter().find(|d| d.country == country));
        let caption = match details {
            Some(d) => format!(
                "{} ({})  {}: {}  {}: {}  {}: {}",
                d.country,
                d.continent,
                x.label(),
                draw::format_grouped(d.value(x)),
                y.label(),
                draw::format_grouped(d.value(y)),
                size.label(),
                draw::format_grouped(d.value(size))
            ),
            None => format!(
                "{}  x: {}  y: {}  size: {}",
                year,
                x.label(),
                y.label(),
                size.label()
            ),
        };
        self.chart.caption(scene, caption)?;
        Ok(())
    }
}
