//! Editor facade: one editing surface with history and session state.
//!
//! Bundles a [`Canvas`], its [`History`], and the active [`Session`]
//! (tool, color, brush, mirror) into a single object, so multiple
//! independent editors can coexist. Methods correspond to discrete user
//! interactions: each one takes exactly one history snapshot before
//! mutating, and additive tools get a fresh per-stroke visited set.

use image::Rgba;

use crate::canvas::Canvas;
use crate::history::History;
use crate::painter::{self, Session, StrokeVisited};

/// A canvas with undo history and an editing session.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    /// The frame sequence being edited.
    pub canvas: Canvas,
    /// Per-frame undo/redo stacks.
    pub history: History,
    /// Active tool, color, brush size, and mirror mode.
    pub session: Session,
}

impl Editor {
    /// Fresh editor over a blank canvas (dimensions clamped).
    pub fn new(width: u32, height: u32) -> Self {
        let canvas = Canvas::new(width, height);
        let history = History::new(canvas.len());
        Editor { canvas, history, session: Session::default() }
    }

    /// Wrap an existing canvas (e.g. a loaded project) with fresh history.
    pub fn from_canvas(canvas: Canvas) -> Self {
        let history = History::new(canvas.len());
        Editor { canvas, history, session: Session::default() }
    }

    /// One complete dab interaction: snapshot, then paint at `(x, y)`.
    pub fn paint_point(&mut self, x: u32, y: u32) {
        self.history.snapshot(&self.canvas);
        let mut visited = StrokeVisited::new();
        painter::paint_at(self.canvas.current_frame_mut(), &self.session, &mut visited, x, y);
    }

    /// One complete line interaction between two cells.
    pub fn paint_line(&mut self, p0: (u32, u32), p1: (u32, u32)) {
        self.history.snapshot(&self.canvas);
        let mut visited = StrokeVisited::new();
        painter::draw_line(self.canvas.current_frame_mut(), &self.session, &mut visited, p0, p1);
    }

    /// One complete rectangle interaction (filled or outline).
    pub fn paint_rect(&mut self, p0: (u32, u32), p1: (u32, u32), filled: bool) {
        self.history.snapshot(&self.canvas);
        let mut visited = StrokeVisited::new();
        painter::paint_rect(
            self.canvas.current_frame_mut(),
            &self.session,
            &mut visited,
            p0,
            p1,
            filled,
        );
    }

    /// One flood-fill interaction with the session color.
    pub fn flood_fill(&mut self, x: u32, y: u32) {
        self.history.snapshot(&self.canvas);
        let color =
            if self.session.erase { crate::color::TRANSPARENT } else { self.session.color };
        painter::flood_fill(self.canvas.current_frame_mut(), x, y, color);
    }

    /// Read the color under a cell; no mutation, no snapshot.
    pub fn pick(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        painter::color_at(self.canvas.current_frame(), x, y)
    }

    /// A freehand drag: snapshot once, then paint every sampled point,
    /// connecting consecutive samples with lines. The whole drag shares
    /// one visited set, so additive tools touch each cell once.
    pub fn paint_stroke(&mut self, points: &[(u32, u32)]) {
        let Some(&first) = points.first() else {
            return;
        };
        self.history.snapshot(&self.canvas);
        let mut visited = StrokeVisited::new();
        let frame = self.canvas.current_frame_mut();
        painter::paint_at(frame, &self.session, &mut visited, first.0, first.1);
        for pair in points.windows(2) {
            painter::draw_line(frame, &self.session, &mut visited, pair[0], pair[1]);
        }
    }

    /// Undo the last interaction on the current frame. False when empty.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.canvas)
    }

    /// Redo the last undone interaction. False when empty.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.canvas)
    }

    /// Insert a frame after the cursor (copy of current or blank) and move
    /// onto it, with an empty history slot.
    pub fn add_frame(&mut self, duplicate: bool) {
        let at = self.canvas.current();
        let new_index = self.canvas.insert_frame(at, duplicate);
        self.history.insert_slot(new_index);
    }

    /// Delete the current frame. False (no-op) when it is the only one.
    pub fn delete_frame(&mut self) -> bool {
        let at = self.canvas.current();
        if !self.canvas.delete_frame(at) {
            return false;
        }
        self.history.remove_slot(at);
        true
    }

    /// Blank the current frame (undoable).
    pub fn clear_frame(&mut self) {
        self.history.snapshot(&self.canvas);
        self.canvas.clear_current();
    }

    /// Move the frame cursor (clamped).
    pub fn select_frame(&mut self, i: usize) {
        self.canvas.set_current(i);
    }

    /// Destructive canvas resize: all frames and all history discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.history.reset(self.canvas.len());
    }

}
