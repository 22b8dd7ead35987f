//! Painting operations over a single frame buffer.
//!
//! Tools paint through a [`Session`] context (active tool, color, brush
//! size, mirror mode) instead of ambient globals, so independent editors
//! can coexist and tests stay simple. Every touched cell is expanded
//! through the mirror transform before mutation.
//!
//! The additive tools (lighten/darken) take a per-stroke visited set owned
//! by the caller: one continuous pointer interaction adjusts each physical
//! cell at most once, even when the brush revisits it or two mirror images
//! land on the same cell.
//!
//! None of these operations push undo history; the caller snapshots once
//! per discrete interaction.

use std::collections::HashSet;

use clap::ValueEnum;
use image::{Rgba, RgbaImage};

use crate::color::TRANSPARENT;
use crate::mirror::{mirrored_points, MirrorMode};

/// Largest accepted brush size.
pub const MAX_BRUSH_SIZE: u32 = 16;

/// Per-channel delta applied by the lighten/darken tools.
const SHADE_DELTA: i16 = 24;

/// Cells already adjusted during the current stroke.
///
/// Scoped to one pointer-down-to-pointer-up interaction: cleared at stroke
/// start and discarded at stroke end. Only the additive tools consult it.
pub type StrokeVisited = HashSet<(u32, u32)>;

/// The editing tool in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Tool {
    /// Paint the active color
    #[default]
    Brush,
    /// Flood fill the region under the cursor
    Bucket,
    /// Straight line between two points
    Line,
    /// Filled rectangle
    Rect,
    /// Rectangle outline
    StrokeRect,
    /// Read the color under the cursor
    Picker,
    /// Raise R,G,B by a fixed step
    Lighten,
    /// Lower R,G,B by a fixed step
    Darken,
}

/// Editor session context passed into every paint call.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Active tool.
    pub tool: Tool,
    /// Active color; alpha 0 means the transparent "color" (paints erase).
    pub color: Rgba<u8>,
    /// Brush size; the painted disk has radius `brush_size - 1`.
    pub brush_size: u32,
    /// Mirror mode applied to all paint operations.
    pub mirror: MirrorMode,
    /// Erase mode (right-button drag in interactive front-ends).
    pub erase: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            tool: Tool::Brush,
            color: Rgba([0, 0, 0, 255]),
            brush_size: 1,
            mirror: MirrorMode::None,
            erase: false,
        }
    }
}

impl Session {
    /// Set the brush size, clamping into `[1, 16]`.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(1, MAX_BRUSH_SIZE);
    }
}

/// Visit every in-bounds cell of the brush disk around `(cx, cy)`.
///
/// The disk has radius `r` under the squared-distance test
/// `dx^2 + dy^2 <= r^2`, so size 1 touches exactly one cell.
fn for_each_in_brush<F: FnMut(u32, u32)>(cx: u32, cy: u32, r: u32, w: u32, h: u32, mut f: F) {
    let (cx, cy, r) = (cx as i64, cy as i64, r as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || x >= w as i64 || y < 0 || y >= h as i64 {
                continue;
            }
            if dx * dx + dy * dy <= r * r {
                f(x as u32, y as u32);
            }
        }
    }
}

/// Apply the session's brush at `(x, y)`: disk, then mirror, then mutate.
///
/// Dispatches on the session:
/// - erase mode or a transparent active color clears cells,
/// - lighten/darken shift R,G,B by ±24 (alpha untouched, transparent cells
///   skipped, each cell at most once per stroke via `visited`),
/// - anything else stamps the active color at full opacity.
///
/// Cells outside the frame are skipped, never an error.
pub fn paint_at(
    frame: &mut RgbaImage,
    session: &Session,
    visited: &mut StrokeVisited,
    x: u32,
    y: u32,
) {
    let (w, h) = frame.dimensions();
    let r = session.brush_size.saturating_sub(1);

    if session.erase || session.color.0[3] == 0 {
        for_each_in_brush(x, y, r, w, h, |px, py| {
            for (qx, qy) in mirrored_points(px, py, w, h, session.mirror) {
                frame.put_pixel(qx, qy, TRANSPARENT);
            }
        });
        return;
    }

    if matches!(session.tool, Tool::Lighten | Tool::Darken) {
        let delta = if session.tool == Tool::Lighten { SHADE_DELTA } else { -SHADE_DELTA };
        for_each_in_brush(x, y, r, w, h, |px, py| {
            for (qx, qy) in mirrored_points(px, py, w, h, session.mirror) {
                if !visited.insert((qx, qy)) {
                    continue;
                }
                let Rgba([pr, pg, pb, pa]) = *frame.get_pixel(qx, qy);
                if pa == 0 {
                    continue;
                }
                let shade = |v: u8| (v as i16 + delta).clamp(0, 255) as u8;
                frame.put_pixel(qx, qy, Rgba([shade(pr), shade(pg), shade(pb), pa]));
            }
        });
        return;
    }

    let Rgba([cr, cg, cb, _]) = session.color;
    for_each_in_brush(x, y, r, w, h, |px, py| {
        for (qx, qy) in mirrored_points(px, py, w, h, session.mirror) {
            frame.put_pixel(qx, qy, Rgba([cr, cg, cb, 255]));
        }
    });
}

/// Scanline flood fill from `(sx, sy)`, replacing the seed's exact RGBA
/// color with `color`.
///
/// Fill is never mirrored: it only touches the literal region reachable
/// from the seed. Filling a region that already has the target color is a
/// no-op. A transparent `color` fills with full transparency.
pub fn flood_fill(frame: &mut RgbaImage, sx: u32, sy: u32, color: Rgba<u8>) {
    let (w, h) = frame.dimensions();
    if sx >= w || sy >= h {
        return;
    }

    let target = if color.0[3] == 0 {
        TRANSPARENT
    } else {
        Rgba([color.0[0], color.0[1], color.0[2], 255])
    };
    let seed = *frame.get_pixel(sx, sy);
    if seed == target {
        return;
    }

    let mut stack = vec![(sx, sy)];
    while let Some((x, y)) = stack.pop() {
        if *frame.get_pixel(x, y) != seed {
            continue;
        }
        // Extend the matching span left and right along this row.
        let mut xl = x;
        while xl > 0 && *frame.get_pixel(xl - 1, y) == seed {
            xl -= 1;
        }
        let mut xr = x;
        while xr + 1 < w && *frame.get_pixel(xr + 1, y) == seed {
            xr += 1;
        }
        // Paint the span and queue matching neighbors above and below.
        for i in xl..=xr {
            frame.put_pixel(i, y, target);
            if y > 0 && *frame.get_pixel(i, y - 1) == seed {
                stack.push((i, y - 1));
            }
            if y + 1 < h && *frame.get_pixel(i, y + 1) == seed {
                stack.push((i, y + 1));
            }
        }
    }
}

/// Paint a line between two cells with Bresenham's algorithm, inclusive of
/// both endpoints, stepping the session brush at every cell.
pub fn draw_line(
    frame: &mut RgbaImage,
    session: &Session,
    visited: &mut StrokeVisited,
    p0: (u32, u32),
    p1: (u32, u32),
) {
    let (mut x0, mut y0) = (p0.0 as i64, p0.1 as i64);
    let (x1, y1) = (p1.0 as i64, p1.1 as i64);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        paint_at(frame, session, visited, x0 as u32, y0 as u32);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Paint a rectangle spanned by two corner cells.
///
/// Corners are normalized and clamped to the frame. Filled mode paints the
/// whole box; outline mode paints the perimeter only (side columns skip the
/// corner cells already covered by the rows).
pub fn paint_rect(
    frame: &mut RgbaImage,
    session: &Session,
    visited: &mut StrokeVisited,
    p0: (u32, u32),
    p1: (u32, u32),
    filled: bool,
) {
    let (w, h) = frame.dimensions();
    let minx = p0.0.min(p1.0);
    let maxx = p0.0.max(p1.0).min(w - 1);
    let miny = p0.1.min(p1.1);
    let maxy = p0.1.max(p1.1).min(h - 1);
    if minx > maxx || miny > maxy {
        return;
    }

    if filled {
        for y in miny..=maxy {
            for x in minx..=maxx {
                paint_at(frame, session, visited, x, y);
            }
        }
    } else {
        for x in minx..=maxx {
            paint_at(frame, session, visited, x, miny);
            paint_at(frame, session, visited, x, maxy);
        }
        for y in (miny + 1)..maxy {
            paint_at(frame, session, visited, minx, y);
            paint_at(frame, session, visited, maxx, y);
        }
    }
}

/// Read the color at a cell. Returns `None` out of bounds.
///
/// Does not mutate and does not participate in mirroring or history.
pub fn color_at(frame: &RgbaImage, x: u32, y: u32) -> Option<Rgba<u8>> {
    frame.get_pixel_checked(x, y).copied()
}
