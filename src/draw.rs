//! Core draw pipeline: read-modify-write for project files.
//!
//! Backs the `pxp draw` command. Loads a frame document into an
//! [`Editor`], applies a batch of draw operations against the selected
//! frame, and serializes the document back out. Every operation is one
//! discrete interaction (one undo snapshot), though CLI usage discards the
//! in-memory history when the process exits.

use std::path::Path;
use thiserror::Error;

use crate::color::format_hex8;
use crate::editor::Editor;
use crate::payload::{Payload, PayloadError};

/// Error type for draw pipeline operations.
#[derive(Debug, Error)]
pub enum DrawError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Payload parse/validation error in the project file.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Operation argument that isn't a coordinate list.
    #[error("invalid operation argument '{arg}', expected {expected}")]
    BadArgument { arg: String, expected: &'static str },
    /// Coordinate outside the canvas.
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} canvas")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// Frame index outside the sequence.
    #[error("frame {frame} out of range (project has {frames} frames)")]
    BadFrame { frame: usize, frames: usize },
}

/// A draw operation to apply to the selected frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Paint the brush at a single cell: `--set x,y`
    Set { x: u32, y: u32 },
    /// Paint a line between two cells: `--line x0,y0,x1,y1`
    Line { x0: u32, y0: u32, x1: u32, y1: u32 },
    /// Paint a filled rectangle: `--rect x0,y0,x1,y1`
    Rect { x0: u32, y0: u32, x1: u32, y1: u32 },
    /// Paint a rectangle outline: `--outline x0,y0,x1,y1`
    Outline { x0: u32, y0: u32, x1: u32, y1: u32 },
    /// Flood fill from a seed cell: `--flood x,y`
    Flood { x: u32, y: u32 },
    /// Read the color at a cell: `--pick x,y`
    Pick { x: u32, y: u32 },
}

impl DrawOp {
    /// Parse an `x,y` argument.
    pub fn parse_point(arg: &str) -> Result<(u32, u32), DrawError> {
        let parts = parse_coords(arg, 2, "x,y")?;
        Ok((parts[0], parts[1]))
    }

    /// Parse an `x0,y0,x1,y1` argument.
    pub fn parse_quad(arg: &str) -> Result<(u32, u32, u32, u32), DrawError> {
        let parts = parse_coords(arg, 4, "x0,y0,x1,y1")?;
        Ok((parts[0], parts[1], parts[2], parts[3]))
    }
}

fn parse_coords(arg: &str, count: usize, expected: &'static str) -> Result<Vec<u32>, DrawError> {
    let parts: Vec<u32> = arg
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| DrawError::BadArgument { arg: arg.to_string(), expected })?;
    if parts.len() != count {
        return Err(DrawError::BadArgument { arg: arg.to_string(), expected });
    }
    Ok(parts)
}

/// Result of a completed draw pipeline run.
#[derive(Debug)]
pub struct DrawResult {
    /// The serialized output document.
    pub content: String,
    /// Whether any operation mutated pixels.
    pub modified: bool,
    /// One `#rrggbbaa` line per `--pick` operation, in order.
    pub picks: Vec<String>,
}

/// Loads a project document, applies draw operations, serializes back.
#[derive(Debug)]
pub struct DrawPipeline {
    editor: Editor,
    picks: Vec<String>,
    modified: bool,
}

impl DrawPipeline {
    /// Load a project file and select the frame to edit.
    pub fn load(path: &Path, frame: Option<usize>) -> Result<Self, DrawError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_string(&content, frame)
    }

    /// Load from document text (separated out for tests).
    pub fn load_from_string(content: &str, frame: Option<usize>) -> Result<Self, DrawError> {
        let payload = Payload::from_json(content)?;
        let canvas = payload.to_canvas()?;
        let mut editor = Editor::from_canvas(canvas);
        if let Some(i) = frame {
            if i >= editor.canvas.len() {
                return Err(DrawError::BadFrame { frame: i, frames: editor.canvas.len() });
            }
            editor.select_frame(i);
        }
        Ok(DrawPipeline { editor, picks: Vec::new(), modified: false })
    }

    /// The editor whose session (color, brush, mirror, tool) callers
    /// configure before applying operations.
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// Apply one operation, bounds-checking its coordinates.
    pub fn apply(&mut self, op: &DrawOp) -> Result<(), DrawError> {
        match *op {
            DrawOp::Set { x, y } => {
                self.check_bounds(x, y)?;
                self.editor.paint_point(x, y);
                self.modified = true;
            }
            DrawOp::Line { x0, y0, x1, y1 } => {
                self.check_bounds(x0, y0)?;
                self.check_bounds(x1, y1)?;
                self.editor.paint_line((x0, y0), (x1, y1));
                self.modified = true;
            }
            DrawOp::Rect { x0, y0, x1, y1 } => {
                self.check_bounds(x0, y0)?;
                self.check_bounds(x1, y1)?;
                self.editor.paint_rect((x0, y0), (x1, y1), true);
                self.modified = true;
            }
            DrawOp::Outline { x0, y0, x1, y1 } => {
                self.check_bounds(x0, y0)?;
                self.check_bounds(x1, y1)?;
                self.editor.paint_rect((x0, y0), (x1, y1), false);
                self.modified = true;
            }
            DrawOp::Flood { x, y } => {
                self.check_bounds(x, y)?;
                self.editor.flood_fill(x, y);
                self.modified = true;
            }
            DrawOp::Pick { x, y } => {
                self.check_bounds(x, y)?;
                if let Some(color) = self.editor.pick(x, y) {
                    self.picks.push(format_hex8(color));
                }
            }
        }
        Ok(())
    }

    /// Apply a batch of operations in order, stopping at the first error.
    pub fn apply_ops(&mut self, ops: &[DrawOp]) -> Result<(), DrawError> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Serialize the (possibly modified) document.
    pub fn serialize(&self) -> DrawResult {
        DrawResult {
            content: Payload::from_canvas(&self.editor.canvas).to_json(),
            modified: self.modified,
            picks: self.picks.clone(),
        }
    }

    /// Serialize and write the document to `target`.
    pub fn write_to(&self, target: &Path) -> Result<DrawResult, DrawError> {
        let result = self.serialize();
        std::fs::write(target, &result.content)?;
        Ok(result)
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), DrawError> {
        let (w, h) = (self.editor.canvas.width(), self.editor.canvas.height());
        if x >= w || y >= h {
            return Err(DrawError::OutOfBounds { x, y, width: w, height: h });
        }
        Ok(())
    }
}
