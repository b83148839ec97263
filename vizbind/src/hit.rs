//! Pointer hit testing against a rendered scene.

use crate::render::Viewport;
use crate::scene::{Attr, NodeId, Scene, ShapeKind};

/// Topmost filled shape painted into cell `(col, row)`.
///
/// Children are checked in reverse order (last painted = on top). Only
/// circles, rects and paths can be hit; lines and text are decoration.
/// Nodes that are retiring are skipped.
pub fn hit_test(scene: &Scene, viewport: &Viewport, col: u16, row: u16) -> Option<NodeId> {
    hit_node(scene, NodeId::ROOT, (0.0, 0.0), viewport, (col, row))
}

fn hit_node(
    scene: &Scene,
    node: NodeId,
    offset: (f64, f64),
    viewport: &Viewport,
    cell: (u16, u16),
) -> Option<NodeId> {
    let kind = scene.kind(node)?;
    let num = |attr: Attr| scene.number(node, attr).unwrap_or(0.0);
    let (dx, dy) = offset;
    let (px, py) = viewport.cell_center(cell.0, cell.1);

    let hit = match kind {
        ShapeKind::Group => {
            let inner = (dx + num(Attr::X), dy + num(Attr::Y));
            return scene
                .children(node)
                .into_iter()
                .rev()
                .find_map(|child| hit_node(scene, child, inner, viewport, cell));
        }
        ShapeKind::Rect => {
            let (x, y) = (dx + num(Attr::X), dy + num(Attr::Y));
            px >= x && px <= x + num(Attr::Width) && py >= y && py <= y + num(Attr::Height)
        }
        ShapeKind::Circle => {
            let (cx, cy, r) = (dx + num(Attr::Cx), dy + num(Attr::Cy), num(Attr::R));
            // Sub-cell circles still occupy the cell holding their center.
            r > 0.0
                && ((px - cx).powi(2) + (py - cy).powi(2) <= r * r
                    || viewport.cell_at(cx, cy) == Some(cell))
        }
        ShapeKind::Path => scene
            .attr(node, Attr::Points)
            .and_then(|v| {
                v.as_points().map(|points| {
                    let shifted: Vec<(f64, f64)> =
                        points.iter().map(|(x, y)| (x + dx, y + dy)).collect();
                    polygon_contains(&shifted, px, py)
                })
            })
            .unwrap_or(false),
        ShapeKind::Line | ShapeKind::Text => false,
    };
    hit.then_some(node)
}

/// Even-odd point-in-polygon test.
pub(crate) fn polygon_contains(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
