//! Per-frame bounded undo/redo history.
//!
//! Each frame index carries its own pair of snapshot stacks. Snapshots are
//! full frame copies; nothing is shared with the live buffer, so later
//! edits never mutate a stored snapshot. Stacks are bounded: past
//! [`MAX_HISTORY`] entries the oldest snapshot is evicted. Undo/redo on an
//! empty stack is a silent no-op reported through the return value.

use image::RgbaImage;

use crate::canvas::Canvas;

/// Maximum undo (and redo) depth per frame.
pub const MAX_HISTORY: usize = 100;

/// Undo/redo stacks for one frame slot.
#[derive(Debug, Clone, Default)]
struct FrameHistory {
    undo: Vec<RgbaImage>,
    redo: Vec<RgbaImage>,
}

/// Undo/redo snapshots for every frame of a canvas.
///
/// Slots are kept index-aligned with the canvas frame sequence; callers
/// mirror frame insertions and deletions with [`History::insert_slot`] and
/// [`History::remove_slot`].
#[derive(Debug, Clone, Default)]
pub struct History {
    slots: Vec<FrameHistory>,
}

impl History {
    /// History for a fresh canvas with `frames` frame slots.
    pub fn new(frames: usize) -> Self {
        History { slots: (0..frames).map(|_| FrameHistory::default()).collect() }
    }

    fn slot_mut(&mut self, i: usize) -> &mut FrameHistory {
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, FrameHistory::default);
        }
        &mut self.slots[i]
    }

    /// Snapshot the canvas's current frame onto its undo stack.
    ///
    /// Called once per discrete user interaction, before the mutation.
    /// Evicts the oldest snapshot past [`MAX_HISTORY`] and invalidates the
    /// redo stack (redo history diverges after a new edit).
    pub fn snapshot(&mut self, canvas: &Canvas) {
        let frame = canvas.current_frame().clone();
        let slot = self.slot_mut(canvas.current());
        slot.undo.push(frame);
        if slot.undo.len() > MAX_HISTORY {
            slot.undo.remove(0);
        }
        slot.redo.clear();
    }

    /// Undo the last edit on the current frame.
    ///
    /// Returns false (no-op) when there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut Canvas) -> bool {
        let slot = self.slot_mut(canvas.current());
        let Some(prev) = slot.undo.pop() else {
            return false;
        };
        slot.redo.push(canvas.current_frame().clone());
        canvas.replace_current(prev)
    }

    /// Redo the last undone edit on the current frame.
    ///
    /// Returns false (no-op) when there is nothing to redo.
    pub fn redo(&mut self, canvas: &mut Canvas) -> bool {
        let slot = self.slot_mut(canvas.current());
        let Some(next) = slot.redo.pop() else {
            return false;
        };
        slot.undo.push(canvas.current_frame().clone());
        canvas.replace_current(next)
    }

    /// Undo depth for frame `i`.
    pub fn undo_depth(&self, i: usize) -> usize {
        self.slots.get(i).map_or(0, |s| s.undo.len())
    }

    /// Redo depth for frame `i`.
    pub fn redo_depth(&self, i: usize) -> usize {
        self.slots.get(i).map_or(0, |s| s.redo.len())
    }

    /// Mirror a frame insertion: add an empty slot at `i`.
    pub fn insert_slot(&mut self, i: usize) {
        let i = i.min(self.slots.len());
        self.slots.insert(i, FrameHistory::default());
    }

    /// Mirror a frame deletion: drop the slot at `i`.
    pub fn remove_slot(&mut self, i: usize) {
        if i < self.slots.len() {
            self.slots.remove(i);
        }
    }

    /// Drop everything and start over with `frames` empty slots
    /// (canvas resize).
    pub fn reset(&mut self, frames: usize) {
        self.slots = (0..frames).map(|_| FrameHistory::default()).collect();
    }
}
