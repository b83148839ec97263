//! One-shot drawings: axes, gridlines and legends.
//!
//! These are not data-bound. Callers clear the target group and draw again
//! whenever a scale changes.

use vizbind::scale::{BandScale, LinearScale};
use vizbind::{Attr, AttrValue, Color, NodeId, Scene, SceneError, ShapeKind, Surface};

const TICK_SIZE: f64 = 6.0;
const GRID: Color = Color::rgb(211, 211, 211);

/// Short tick label: `1.5k`, `12M`, `3B`, plain numbers below a thousand.
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    if (scaled - scaled.round()).abs() < 1e-9 {
        format!("{}{}", scaled.round() as i64, suffix)
    } else {
        format!("{:.1}{}", scaled, suffix)
    }
}

/// Full value with thousands separators: `127,000,000`, `81.6`.
pub fn format_grouped(value: f64) -> String {
    let text = value.abs().to_string();
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn line(
    scene: &mut Scene,
    parent: NodeId,
    from: (f64, f64),
    to: (f64, f64),
    stroke: Color,
) -> Result<NodeId, SceneError> {
    let node = scene.append(parent, ShapeKind::Line)?;
    scene.set_attr(node, Attr::X, from.0.into())?;
    scene.set_attr(node, Attr::Y, from.1.into())?;
    scene.set_attr(node, Attr::X2, to.0.into())?;
    scene.set_attr(node, Attr::Y2, to.1.into())?;
    scene.set_attr(node, Attr::Stroke, stroke.into())?;
    Ok(node)
}

/// A text node at `(x, y)`, anchored `start`, `middle` or `end`.
pub fn label(
    scene: &mut Scene,
    parent: NodeId,
    text: impl Into<String>,
    at: (f64, f64),
    anchor: &str,
) -> Result<NodeId, SceneError> {
    let node = scene.append(parent, ShapeKind::Text)?;
    scene.set_attr(node, Attr::X, at.0.into())?;
    scene.set_attr(node, Attr::Y, at.1.into())?;
    scene.set_attr(node, Attr::Label, AttrValue::Text(text.into()))?;
    scene.set_attr(node, Attr::Anchor, anchor.into())?;
    Ok(node)
}

/// Horizontal axis at height `y` with about `count` ticks.
pub fn axis_bottom(
    scene: &mut Scene,
    parent: NodeId,
    scale: &LinearScale,
    y: f64,
    count: usize,
) -> Result<(), SceneError> {
    let (r0, r1) = scale.range();
    line(scene, parent, (r0, y), (r1, y), Color::BLACK)?;
    for tick in scale.ticks(count) {
        let x = scale.map(tick);
        line(scene, parent, (x, y), (x, y + TICK_SIZE), Color::BLACK)?;
        label(scene, parent, format_tick(tick), (x, y + 3.0 * TICK_SIZE), "middle")?;
    }
    Ok(())
}

/// Vertical axis at `x` with about `count` ticks.
pub fn axis_left(
    scene: &mut Scene,
    parent: NodeId,
    scale: &LinearScale,
    x: f64,
    count: usize,
) -> Result<(), SceneError> {
    let (r0, r1) = scale.range();
    line(scene, parent, (x, r0), (x, r1), Color::BLACK)?;
    for tick in scale.ticks(count) {
        let y = scale.map(tick);
        line(scene, parent, (x - TICK_SIZE, y), (x, y), Color::BLACK)?;
        label(scene, parent, format_tick(tick), (x - 1.5 * TICK_SIZE, y), "end")?;
    }
    Ok(())
}

/// Category axis under a band scale, one label per band centre.
pub fn band_axis_bottom(
    scene: &mut Scene,
    parent: NodeId,
    scale: &BandScale,
    y: f64,
) -> Result<(), SceneError> {
    let (r0, r1) = scale.range();
    line(scene, parent, (r0, y), (r1, y), Color::BLACK)?;
    let half = scale.bandwidth() / 2.0;
    for category in scale.domain() {
        if let Some(x) = scale.map(category) {
            line(scene, parent, (x + half, y), (x + half, y + TICK_SIZE), Color::BLACK)?;
            label(scene, parent, category.clone(), (x + half, y + 3.0 * TICK_SIZE), "middle")?;
        }
    }
    Ok(())
}

/// Light horizontal gridlines across `width` at every tick of `scale`.
pub fn grid_horizontal(
    scene: &mut Scene,
    parent: NodeId,
    scale: &LinearScale,
    width: f64,
    count: usize,
) -> Result<(), SceneError> {
    for tick in scale.ticks(count) {
        let y = scale.map(tick);
        line(scene, parent, (0.0, y), (width, y), GRID)?;
    }
    Ok(())
}

/// A row of color swatches, each followed by its name in the same color.
pub fn legend(
    scene: &mut Scene,
    parent: NodeId,
    entries: &[(String, Color)],
    origin: (f64, f64),
    step: f64,
) -> Result<(), SceneError> {
    const SWATCH: f64 = 10.0;
    for (i, (name, color)) in entries.iter().enumerate() {
        let x = origin.0 + step * i as f64;
        let swatch = scene.append(parent, ShapeKind::Rect)?;
        scene.set_attr(swatch, Attr::X, x.into())?;
        scene.set_attr(swatch, Attr::Y, origin.1.into())?;
        scene.set_attr(swatch, Attr::Width, SWATCH.into())?;
        scene.set_attr(swatch, Attr::Height, SWATCH.into())?;
        scene.set_attr(swatch, Attr::Fill, (*color).into())?;
        let text = label(scene, parent, name.clone(), (x + 2.0 * SWATCH, origin.1 + SWATCH / 2.0), "start")?;
        scene.set_attr(text, Attr::Fill, (*color).into())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick_suffixes() {
        assert_eq!(format_tick(500.0), "500");
        assert_eq!(format_tick(1500.0), "1.5k");
        assert_eq!(format_tick(12_000_000.0), "12M");
        assert_eq!(format_tick(3e9), "3B");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(127_000_000.0), "127,000,000");
        assert_eq!(format_grouped(34000.0), "34,000");
        assert_eq!(format_grouped(81.6), "81.6");
        assert_eq!(format_grouped(-1234.5), "-1,234.5");
        assert_eq!(format_grouped(0.0), "0");
    }
}
