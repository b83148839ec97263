//! Rasterizes a [`Scene`] into a character-cell [`Buffer`].
//!
//! Scene coordinates are pixels. A [`Viewport`] maps them onto the cell
//! grid, every cell being sampled at its center. Nodes paint in tree order,
//! so later siblings cover earlier ones.

mod raster;

use std::time::Instant;

use crate::buffer::Buffer;
use crate::scene::{Attr, NodeId, Scene, ShapeKind};
use crate::text::TextAnchor;
use crate::types::{Color, Rgb};

use raster::{fill_circle, fill_polygon, fill_rect, draw_line, draw_text};

/// Maps scene pixel space onto the cells of a buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Scene width in pixels.
    pub width: f64,
    /// Scene height in pixels.
    pub height: f64,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(width: f64, height: f64, cols: u16, rows: u16) -> Self {
        Self {
            width,
            height,
            cols,
            rows,
        }
    }

    /// Horizontal pixels per cell.
    pub fn cell_width(&self) -> f64 {
        self.width / self.cols.max(1) as f64
    }

    /// Vertical pixels per cell.
    pub fn cell_height(&self) -> f64 {
        self.height / self.rows.max(1) as f64
    }

    /// Scene position of the center of cell `(col, row)`.
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.cell_width(),
            (row as f64 + 0.5) * self.cell_height(),
        )
    }

    /// Cell containing scene point `(x, y)`, if it lies inside the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let col = (x / self.cell_width()).floor();
        let row = (y / self.cell_height()).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

/// Paint style resolved from a node's attributes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Paint {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub stroke_width: f64,
    pub opacity: f32,
}

#[derive(Default)]
struct RenderStats {
    nodes: usize,
    shapes: usize,
}

/// Draw every node of `scene` at its currently displayed attribute values.
pub fn render_to_buffer(scene: &Scene, viewport: &Viewport, buf: &mut Buffer) {
    let start = Instant::now();
    let mut stats = RenderStats::default();

    render_node(scene, NodeId::ROOT, (0.0, 0.0), viewport, buf, &mut stats);

    log::debug!(
        "[render] nodes={} shapes={} in {:>6.2}µs",
        stats.nodes,
        stats.shapes,
        start.elapsed().as_secs_f64() * 1_000_000.0
    );
}

fn render_node(
    scene: &Scene,
    node: NodeId,
    offset: (f64, f64),
    viewport: &Viewport,
    buf: &mut Buffer,
    stats: &mut RenderStats,
) {
    let Some(kind) = scene.kind(node) else {
        return;
    };
    stats.nodes += 1;

    let num = |attr: Attr| scene.number(node, attr).unwrap_or(0.0);
    let color = |attr: Attr, default: Color| {
        scene
            .attr(node, attr)
            .and_then(|v| v.as_color())
            .unwrap_or(default)
            .to_rgb()
    };
    let paint = Paint {
        fill: color(Attr::Fill, Color::BLACK),
        stroke: color(Attr::Stroke, Color::BLACK),
        stroke_width: num(Attr::StrokeWidth),
        opacity: scene.number(node, Attr::Opacity).unwrap_or(1.0) as f32,
    };
    let (dx, dy) = offset;

    match kind {
        ShapeKind::Group => {
            // Groups translate their children by (x, y).
            let inner = (dx + num(Attr::X), dy + num(Attr::Y));
            for child in scene.all_children(node) {
                render_node(scene, child, inner, viewport, buf, stats);
            }
            return;
        }
        ShapeKind::Rect => fill_rect(
            buf,
            viewport,
            (dx + num(Attr::X), dy + num(Attr::Y)),
            (num(Attr::Width), num(Attr::Height)),
            paint,
        ),
        ShapeKind::Circle => fill_circle(
            buf,
            viewport,
            (dx + num(Attr::Cx), dy + num(Attr::Cy)),
            num(Attr::R),
            paint,
        ),
        ShapeKind::Path => {
            let points: Vec<(f64, f64)> = scene
                .attr(node, Attr::Points)
                .and_then(|v| v.as_points().map(|p| p.to_vec()))
                .unwrap_or_default()
                .into_iter()
                .map(|(x, y)| (x + dx, y + dy))
                .collect();
            fill_polygon(buf, viewport, &points, paint);
        }
        ShapeKind::Line => draw_line(
            buf,
            viewport,
            (dx + num(Attr::X), dy + num(Attr::Y)),
            (dx + num(Attr::X2), dy + num(Attr::Y2)),
            paint,
        ),
        ShapeKind::Text => {
            let label = scene.attr(node, Attr::Label);
            let anchor = scene
                .attr(node, Attr::Anchor)
                .and_then(|v| v.as_text().map(TextAnchor::parse))
                .unwrap_or_default();
            if let Some(text) = label.as_ref().and_then(|v| v.as_text()) {
                draw_text(
                    buf,
                    viewport,
                    (dx + num(Attr::X), dy + num(Attr::Y)),
                    text,
                    anchor,
                    paint,
                );
            }
        }
    }
    stats.shapes += 1;
}
