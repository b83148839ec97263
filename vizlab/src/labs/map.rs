//! Crime choropleth.
//!
//! Districts are shaded from white to red by their count for the selected
//! setting, relative to the busiest district. Pointing at a district shows
//! its counts in the caption.

use vizbind::{Attr, BindingSet, Color, Key, NodeId, Scene, ShapeKind};

use crate::config::{LabConfig, Margin};
use crate::context::ChartContext;
use crate::data::{CrimeMap, District};
use crate::draw;
use crate::error::LabError;
use crate::labs::Lab;

pub fn default_config() -> LabConfig {
    LabConfig::new(800.0, 600.0)
        .margin(Margin::uniform(20.0))
        .transition(std::time::Duration::from_millis(500))
}

/// Fill for a district with `count` crimes when the busiest has `max`.
///
/// `rgb(255, 255 - i, 255 - i)` with `i = round(255 * count / max)`.
pub fn heat_color(count: f64, max: f64) -> Color {
    let intensity = if max > 0.0 {
        (255.0 * count / max).round().clamp(0.0, 255.0) as u8
    } else {
        0
    };
    Color::rgb(255, 255 - intensity, 255 - intensity)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    Next,
    Previous,
    Select(String),
    /// District under the pointer, if any.
    Hover(Option<u32>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapState {
    pub settings: Vec<String>,
    pub selected: usize,
    pub hovered: Option<u32>,
}

impl MapState {
    pub fn new(settings: Vec<String>) -> Self {
        Self {
            settings,
            selected: 0,
            hovered: None,
        }
    }

    pub fn setting(&self) -> &str {
        self.settings
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or(crate::data::ALL_CRIMES)
    }

    /// Unknown settings in `Select` leave the state unchanged.
    pub fn reduce(self, event: MapEvent) -> Self {
        let len = self.settings.len().max(1);
        match event {
            MapEvent::Next => Self {
                selected: (self.selected + 1) % len,
                ..self
            },
            MapEvent::Previous => Self {
                selected: (self.selected + len - 1) % len,
                ..self
            },
            MapEvent::Select(name) => {
                let selected = self
                    .settings
                    .iter()
                    .position(|s| *s == name)
                    .unwrap_or(self.selected);
                Self { selected, ..self }
            }
            MapEvent::Hover(hovered) => Self { hovered, ..self },
        }
    }
}

pub struct MapLab {
    config: LabConfig,
    data: CrimeMap,
    state: MapState,
    chart: ChartContext<()>,
    districts: BindingSet<u32>,
}

impl MapLab {
    pub fn mount(scene: &mut Scene, config: LabConfig, data: CrimeMap) -> Result<Self, LabError> {
        let chart = ChartContext::mount(scene, &config, ())?;

        for district in &data.districts {
            let (x, y) = centroid(&district.outline);
            draw::label(scene, chart.layers.labels, district.dist_num.to_string(), (x, y), "middle")?;
        }

        Ok(Self {
            state: MapState::new(data.table.settings().to_vec()),
            districts: BindingSet::new(chart.layers.marks, ShapeKind::Path),
            config,
            data,
            chart,
        })
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn districts(&self) -> &BindingSet<u32> {
        &self.districts
    }

    pub fn chart(&self) -> &ChartContext<()> {
        &self.chart
    }
}

impl Lab for MapLab {
    type Event = MapEvent;

    fn config(&self) -> &LabConfig {
        &self.config
    }

    fn event_for_key(&mut self, key: Key) -> Option<MapEvent> {
        match key {
            Key::Down => Some(MapEvent::Next),
            Key::Up => Some(MapEvent::Previous),
            _ => None,
        }
    }

    fn event_for_hover(&mut self, node: Option<NodeId>) -> Option<MapEvent> {
        let district = node.and_then(|node| self.districts.key_of(node)).copied();
        (district != self.state.hovered).then_some(MapEvent::Hover(district))
    }

    fn handle(&mut self, event: MapEvent) {
        log::debug!("[map] {:?}", event);
        self.state = std::mem::take(&mut self.state).reduce(event);
    }

    fn render(&mut self, scene: &mut Scene) -> Result<(), LabError> {
        let table = &self.data.table;
        let setting = self.state.setting();
        let max = table.max(setting);
        let fill = |district: &District| heat_color(table.count(district.dist_num, setting), max);

        self.districts.refresh(
            scene,
            &self.data.districts,
            |_, district| district.dist_num,
            |path, district| -> Result<(), LabError> {
                path.set(Attr::Points, district.outline.clone())?
                    .set(Attr::Stroke, Color::BLACK)?
                    .set(Attr::Fill, fill(district))?;
                Ok(())
            },
            |path, district| {
                path.animate(Attr::Fill, fill(district))?;
                Ok(())
            },
            |_| Ok(()),
            self.config.transition_config(),
        )?;

        let hovered = self
            .state
            .hovered
            .filter(|num| self.districts.contains(num));
        let busiest = self
            .data
            .districts
            .iter()
            .map(|d| (d.dist_num, table.count(d.dist_num, setting)))
            .fold(None, |best: Option<(u32, f64)>, (num, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((num, count)),
            });
        let caption = match (hovered, busiest) {
            (Some(num), _) => format!(
                "District {}  {} crimes: {}  Total crimes: {}",
                num,
                setting,
                table.count(num, setting),
                table.total(num)
            ),
            (None, Some((num, count))) => format!(
                "{}  busiest: district {} with {} of {} crimes",
                setting,
                num,
                count,
                table.total(num)
            ),
            (None, None) => setting.to_string(),
        };
        log::debug!("[map] {} max={}", setting, max);
        self.chart.caption(scene, caption)?;
        Ok(())
    }
}

/// Mean of the outline's vertices.
fn centroid(outline: &[(f64, f64)]) -> (f64, f64) {
    if outline.is_empty() {
        return (0.0, 0.0);
    }
    let n = outline.len() as f64;
    let (sx, sy) = outline
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    (sx / n, sy / n)
}
