//! Bar chart of fruit counts.

use std::convert::Infallible;

use vizbind::scale::{extent_max, BandScale, LinearScale};
use vizbind::{Attr, BindingSet, Color, Key, Scene, ShapeKind};

use crate::config::{LabConfig, Margin};
use crate::context::ChartContext;
use crate::draw;
use crate::error::LabError;
use crate::labs::Lab;

#[derive(Debug, Clone, PartialEq)]
pub struct Fruit {
    pub category: String,
    pub count: f64,
    pub color: Color,
}

impl Fruit {
    pub fn new(category: &str, count: f64, color: Color) -> Self {
        Self {
            category: category.to_string(),
            count,
            color,
        }
    }
}

/// The fixed fruit dataset.
pub fn fruits() -> Vec<Fruit> {
    vec![
        Fruit::new("Apple", 10.0, Color::rgb(255, 99, 71)),
        Fruit::new("Banana", 30.0, Color::rgb(255, 215, 0)),
        Fruit::new("Pear", 45.0, Color::rgb(144, 238, 144)),
        Fruit::new("Orange", 60.0, Color::rgb(255, 140, 0)),
        Fruit::new("Grape", 20.0, Color::rgb(219, 112, 147)),
    ]
}

pub fn default_config() -> LabConfig {
    LabConfig::new(600.0, 400.0).margin(Margin::new(40.0, 40.0, 40.0, 60.0))
}

#[derive(Debug, Clone)]
pub struct BarsScales {
    pub x: BandScale,
    pub y: LinearScale,
}

impl BarsScales {
    pub fn new(data: &[Fruit], width: f64, height: f64) -> Self {
        let max = extent_max(data.iter().map(|f| f.count)).unwrap_or(1.0);
        Self {
            x: BandScale::new(data.iter().map(|f| f.category.as_str()), (0.0, width)).padding(0.2),
            y: LinearScale::new((0.0, max), (height, 0.0)),
        }
    }
}

/// Static bars keyed by category. The lab has no events.
pub struct BarsLab {
    config: LabConfig,
    data: Vec<Fruit>,
    chart: ChartContext<BarsScales>,
    bars: BindingSet<String>,
}

impl BarsLab {
    pub fn mount(scene: &mut Scene, config: LabConfig, data: Vec<Fruit>) -> Result<Self, LabError> {
        let (width, height) = config.inner_size();
        let scales = BarsScales::new(&data, width, height);
        let chart = ChartContext::mount(scene, &config, scales)?;
        let bars = BindingSet::new(chart.layers.marks, ShapeKind::Rect);

        let axes = chart.layers.axes;
        let y_ticks = (chart.scales.y.domain().1 / 10.0).ceil() as usize;
        draw::grid_horizontal(scene, axes, &chart.scales.y, width, y_ticks)?;
        draw::band_axis_bottom(scene, axes, &chart.scales.x, height)?;
        draw::axis_left(scene, axes, &chart.scales.y, 0.0, y_ticks)?;
        draw::label(scene, axes, "fruit", (width / 2.0, height + config.margin.bottom - 10.0), "middle")?;
        draw::label(scene, axes, "count", (0.0, -12.0), "middle")?;
        chart.caption(scene, "Fruit counts")?;

        Ok(Self {
            config,
            data,
            chart,
            bars,
        })
    }

    pub fn bars(&self) -> &BindingSet<String> {
        &self.bars
    }
}

impl Lab for BarsLab {
    type Event = Infallible;

    fn config(&self) -> &LabConfig {
        &self.config
    }

    fn event_for_key(&mut self, _key: Key) -> Option<Infallible> {
        None
    }

    fn handle(&mut self, event: Infallible) {
        match event {}
    }

    fn render(&mut self, scene: &mut Scene) -> Result<(), LabError> {
        let scales = &self.chart.scales;
        let height = self.chart.height;
        let place = |bar: &mut vizbind::Bound<'_, Scene>, fruit: &Fruit| -> Result<(), LabError> {
            let x = scales.x.map(&fruit.category).unwrap_or(0.0);
            let y = scales.y.map(fruit.count);
            bar.animate(Attr::X, x)?
                .animate(Attr::Y, y)?
                .animate(Attr::Width, scales.x.bandwidth())?
                .animate(Attr::Height, height - y)?
                .animate(Attr::Fill, fruit.color)?;
            Ok(())
        };

        self.bars.refresh(
            scene,
            &self.data,
            |_, fruit| fruit.category.clone(),
            place,
            place,
            |_| Ok(()),
            self.config.transition_config(),
        )?;
        Ok(())
    }
}
