use crate::buffer::Buffer;
use crate::hit::polygon_contains;
use crate::text::{char_width, display_width, TextAnchor};
use crate::types::Rgb;

use super::{Paint, Viewport};

fn paint_bg(buf: &mut Buffer, col: u16, row: u16, paint: Paint) {
    if let Some(cell) = buf.get_mut(col, row) {
        cell.bg = paint.fill.over(cell.bg, paint.opacity);
    }
}

/// Outlines are drawn opaque.
fn paint_stroke(buf: &mut Buffer, col: u16, row: u16, paint: Paint) {
    if let Some(cell) = buf.get_mut(col, row) {
        cell.bg = paint.stroke;
    }
}

fn set_char(buf: &mut Buffer, col: u16, row: u16, ch: char, fg: Rgb) {
    if let Some(cell) = buf.get_mut(col, row) {
        cell.char = ch;
        cell.fg = fg;
        cell.wide_continuation = false;
        // Preserve existing background
    }
}

/// Cell range whose centers may fall inside `[lo, hi]` along one axis.
fn span(lo: f64, hi: f64, cell: f64, limit: u16) -> std::ops::Range<u16> {
    let first = ((lo / cell) - 0.5).ceil().max(0.0);
    let last = ((hi / cell) - 0.5).floor().min(limit as f64 - 1.0);
    if last < first {
        return 0..0;
    }
    first as u16..last as u16 + 1
}

pub(super) fn fill_rect(
    buf: &mut Buffer,
    viewport: &Viewport,
    origin: (f64, f64),
    size: (f64, f64),
    paint: Paint,
) {
    let (x, y) = origin;
    let (w, h) = size;
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    for row in span(y, y + h, viewport.cell_height(), viewport.rows) {
        for col in span(x, x + w, viewport.cell_width(), viewport.cols) {
            paint_bg(buf, col, row, paint);
        }
    }
}

pub(super) fn fill_circle(
    buf: &mut Buffer,
    viewport: &Viewport,
    center: (f64, f64),
    r: f64,
    paint: Paint,
) {
    if r <= 0.0 {
        return;
    }
    let (cx, cy) = center;
    // A ring at least one cell thick, so thin outlines stay visible.
    let ring = paint
        .stroke_width
        .max(viewport.cell_width().min(viewport.cell_height()));
    let mut painted = false;
    for row in span(cy - r, cy + r, viewport.cell_height(), viewport.rows) {
        for col in span(cx - r, cx + r, viewport.cell_width(), viewport.cols) {
            let (px, py) = viewport.cell_center(col, row);
            let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            if distance > r {
                continue;
            }
            if paint.stroke_width > 0.0 && distance > r - ring {
                paint_stroke(buf, col, row, paint);
            } else {
                paint_bg(buf, col, row, paint);
            }
            painted = true;
        }
    }
    // Circles smaller than a cell still show up as one cell.
    if !painted {
        if let Some((col, row)) = viewport.cell_at(cx, cy) {
            if paint.stroke_width > 0.0 {
                paint_stroke(buf, col, row, paint);
            } else {
                paint_bg(buf, col, row, paint);
            }
        }
    }
}

/// Even-odd fill of a closed polygon.
pub(super) fn fill_polygon(buf: &mut Buffer, viewport: &Viewport, points: &[(f64, f64)], paint: Paint) {
    if points.len() < 3 {
        return;
    }
    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
    );
    for row in span(min_y, max_y, viewport.cell_height(), viewport.rows) {
        for col in span(min_x, max_x, viewport.cell_width(), viewport.cols) {
            let (px, py) = viewport.cell_center(col, row);
            if polygon_contains(points, px, py) {
                paint_bg(buf, col, row, paint);
            }
        }
    }
}

pub(super) fn draw_line(
    buf: &mut Buffer,
    viewport: &Viewport,
    from: (f64, f64),
    to: (f64, f64),
    paint: Paint,
) {
    let (Some((c0, r0)), Some((c1, r1))) = (
        viewport.cell_at(from.0, from.1).or_else(|| clamp_cell(viewport, from)),
        viewport.cell_at(to.0, to.1).or_else(|| clamp_cell(viewport, to)),
    ) else {
        return;
    };
    let ch = if r0 == r1 {
        '─'
    } else if c0 == c1 {
        '│'
    } else {
        '·'
    };

    let (dc, dr) = (c1 as i32 - c0 as i32, r1 as i32 - r0 as i32);
    let steps = dc.abs().max(dr.abs()).max(1);
    for i in 0..=steps {
        let col = c0 as f64 + dc as f64 * i as f64 / steps as f64;
        let row = r0 as f64 + dr as f64 * i as f64 / steps as f64;
        set_char(buf, col.round() as u16, row.round() as u16, ch, paint.stroke);
    }
}

/// Nearest cell for a point just outside the grid.
fn clamp_cell(viewport: &Viewport, point: (f64, f64)) -> Option<(u16, u16)> {
    if viewport.cols == 0 || viewport.rows == 0 {
        return None;
    }
    let col = (point.0 / viewport.cell_width()).floor().clamp(0.0, viewport.cols as f64 - 1.0);
    let row = (point.1 / viewport.cell_height()).floor().clamp(0.0, viewport.rows as f64 - 1.0);
    Some((col as u16, row as u16))
}

pub(super) fn draw_text(
    buf: &mut Buffer,
    viewport: &Viewport,
    at: (f64, f64),
    text: &str,
    anchor: TextAnchor,
    paint: Paint,
) {
    let Some((col, row)) = viewport.cell_at(at.0.max(0.0), at.1) else {
        return;
    };
    let mut x = col.saturating_sub(anchor.offset(display_width(text)) as u16);

    for ch in text.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if x + width > buf.width() {
            break;
        }
        set_char(buf, x, row, ch, paint.fill);
        for extra in 1..width {
            if let Some(cell) = buf.get_mut(x + extra, row) {
                cell.wide_continuation = true;
            }
        }
        x += width;
    }
}
