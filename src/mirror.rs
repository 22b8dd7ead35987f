//! Symmetry transform: replicate one edited cell across mirror axes.
//!
//! Painting tools run every touched cell through [`mirrored_points`] so a
//! single pointer position can edit up to four cells at once. Mappings are
//! pure coordinate arithmetic over the canvas extents; reflections landing
//! outside the buffer (possible on non-square canvases for the diagonal
//! modes) are dropped silently.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Mirror mode applied to all paint operations of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MirrorMode {
    /// No mirroring
    #[default]
    None,
    /// Left-right mirror across the vertical center line
    #[value(alias = "x")]
    Horizontal,
    /// Top-bottom mirror across the horizontal center line
    #[value(alias = "y")]
    Vertical,
    /// Horizontal and vertical combined (four-way)
    #[value(alias = "xy")]
    Both,
    /// 180-degree point symmetry about the canvas center
    Central,
    /// Main diagonal (top-left to bottom-right)
    #[value(alias = "diag")]
    Diagonal,
    /// Anti-diagonal (bottom-left to top-right)
    #[value(alias = "anti")]
    AntiDiagonal,
}

/// Compute the set of cells that must receive an edit at `(x, y)`.
///
/// The returned list always starts with the origin point, keeps first-seen
/// order, contains no duplicates (reflections can coincide on the exact
/// center line), and only holds in-bounds coordinates.
pub fn mirrored_points(x: u32, y: u32, w: u32, h: u32, mode: MirrorMode) -> Vec<(u32, u32)> {
    let mut points = Vec::with_capacity(4);
    let mut push = |px: u32, py: u32| {
        if px < w && py < h && !points.contains(&(px, py)) {
            points.push((px, py));
        }
    };

    push(x, y);

    match mode {
        MirrorMode::None => {}
        MirrorMode::Horizontal => push(w - 1 - x, y),
        MirrorMode::Vertical => push(x, h - 1 - y),
        MirrorMode::Both => {
            push(w - 1 - x, y);
            push(x, h - 1 - y);
            push(w - 1 - x, h - 1 - y);
        }
        MirrorMode::Central => push(w - 1 - x, h - 1 - y),
        MirrorMode::Diagonal => push(y, x),
        MirrorMode::AntiDiagonal => {
            // (x, y) -> (W-1 - y, H-1 - x); drops out on irregular grids
            if y < w && x < h {
                push(w - 1 - y, h - 1 - x);
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_returns_only_origin() {
        assert_eq!(mirrored_points(3, 5, 8, 8, MirrorMode::None), vec![(3, 5)]);
    }

    #[test]
    fn test_origin_always_first() {
        for mode in [
            MirrorMode::None,
            MirrorMode::Horizontal,
            MirrorMode::Vertical,
            MirrorMode::Both,
            MirrorMode::Central,
            MirrorMode::Diagonal,
            MirrorMode::AntiDiagonal,
        ] {
            let pts = mirrored_points(2, 1, 8, 8, mode);
            assert_eq!(pts[0], (2, 1), "{:?}", mode);
        }
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(mirrored_points(1, 2, 8, 8, MirrorMode::Horizontal), vec![(1, 2), (6, 2)]);
    }

    #[test]
    fn test_vertical() {
        assert_eq!(mirrored_points(1, 2, 8, 8, MirrorMode::Vertical), vec![(1, 2), (1, 5)]);
    }

    #[test]
    fn test_both_gives_four_points() {
        let pts = mirrored_points(1, 2, 8, 8, MirrorMode::Both);
        assert_eq!(pts, vec![(1, 2), (6, 2), (1, 5), (6, 5)]);
    }

    #[test]
    fn test_center_line_deduplicates() {
        // On a 7-wide canvas the center column mirrors onto itself.
        let pts = mirrored_points(3, 0, 7, 7, MirrorMode::Horizontal);
        assert_eq!(pts, vec![(3, 0)]);
    }

    #[test]
    fn test_central_is_involution() {
        let (w, h) = (16, 9);
        for (x, y) in [(0, 0), (5, 3), (15, 8), (8, 4)] {
            let pts = mirrored_points(x, y, w, h, MirrorMode::Central);
            let (mx, my) = *pts.last().unwrap();
            let back = mirrored_points(mx, my, w, h, MirrorMode::Central);
            assert!(back.contains(&(x, y)));
        }
    }

    #[test]
    fn test_diagonal_swaps_coordinates() {
        assert_eq!(mirrored_points(3, 1, 8, 8, MirrorMode::Diagonal), vec![(3, 1), (1, 3)]);
    }

    #[test]
    fn test_diagonal_clips_on_irregular_grid() {
        // (0,5) reflects to (5,0), outside a 4-wide canvas, so only the
        // origin survives.
        assert_eq!(mirrored_points(0, 5, 4, 8, MirrorMode::Diagonal), vec![(0, 5)]);
    }

    #[test]
    fn test_anti_diagonal() {
        // (x, y) -> (W-1-y, H-1-x) on an 8x8 canvas
        assert_eq!(
            mirrored_points(2, 1, 8, 8, MirrorMode::AntiDiagonal),
            vec![(2, 1), (6, 5)]
        );
    }

    #[test]
    fn test_all_points_in_bounds() {
        let (w, h) = (5, 9);
        for mode in [
            MirrorMode::Horizontal,
            MirrorMode::Vertical,
            MirrorMode::Both,
            MirrorMode::Central,
            MirrorMode::Diagonal,
            MirrorMode::AntiDiagonal,
        ] {
            for y in 0..h {
                for x in 0..w {
                    for (px, py) in mirrored_points(x, y, w, h, mode) {
                        assert!(px < w && py < h, "{:?} ({},{}) -> ({},{})", mode, x, y, px, py);
                    }
                }
            }
        }
    }
}
