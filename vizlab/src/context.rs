//! Per-chart state passed explicitly to every render.

use vizbind::{Attr, AttrValue, NodeId, Scene, SceneError, ShapeKind, Surface};

use crate::config::LabConfig;

/// Scene groups a chart draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayers {
    /// Translated by the margins; every other layer except `caption` lives
    /// inside it.
    pub frame: NodeId,
    pub axes: NodeId,
    pub marks: NodeId,
    /// Text placed over the marks, such as region names.
    pub labels: NodeId,
    pub legend: NodeId,
    /// Status line above the frame.
    pub caption: NodeId,
}

impl ChartLayers {
    pub fn mount(scene: &mut Scene, config: &LabConfig) -> Result<Self, SceneError> {
        let frame = scene.append(NodeId::ROOT, ShapeKind::Group)?;
        scene.set_attr(frame, Attr::X, config.margin.left.into())?;
        scene.set_attr(frame, Attr::Y, config.margin.top.into())?;

        // Marks come after axes so they paint over gridlines.
        let axes = scene.append(frame, ShapeKind::Group)?;
        let marks = scene.append(frame, ShapeKind::Group)?;
        let labels = scene.append(frame, ShapeKind::Group)?;
        let legend = scene.append(frame, ShapeKind::Group)?;

        let caption = scene.append(NodeId::ROOT, ShapeKind::Text)?;
        scene.set_attr(caption, Attr::X, (config.width / 2.0).into())?;
        scene.set_attr(caption, Attr::Y, (config.margin.top / 3.0).into())?;
        scene.set_attr(caption, Attr::Anchor, "middle".into())?;

        Ok(Self {
            frame,
            axes,
            marks,
            labels,
            legend,
            caption,
        })
    }
}

/// Inner dimensions, mounted layers and the scales of one chart.
#[derive(Debug, Clone)]
pub struct ChartContext<S> {
    pub width: f64,
    pub height: f64,
    pub layers: ChartLayers,
    pub scales: S,
}

impl<S> ChartContext<S> {
    pub fn mount(scene: &mut Scene, config: &LabConfig, scales: S) -> Result<Self, SceneError> {
        let (width, height) = config.inner_size();
        let layers = ChartLayers::mount(scene, config)?;
        log::debug!(
            "[chart] mounted {}x{} plot in {}x{} frame",
            width,
            height,
            config.width,
            config.height
        );
        Ok(Self {
            width,
            height,
            layers,
            scales,
        })
    }

    /// Replace the status line text.
    pub fn caption(&self, scene: &mut Scene, text: impl Into<String>) -> Result<(), SceneError> {
        scene.set_attr(self.layers.caption, Attr::Label, AttrValue::Text(text.into()))
    }
}
