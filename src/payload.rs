//! Frame persistence payload: JSON import/export of raw frame pixels.
//!
//! The wire format is `{"w": W, "h": H, "frames": [[cell, ...], ...]}`
//! where each frame is exactly `W*H` row-major `#rrggbbaa` strings. A
//! payload only applies to a canvas whose dimensions match exactly;
//! anything else is a recoverable validation failure, never a panic.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::{Canvas, MAX_DIMENSION, MIN_DIMENSION};
use crate::color::{format_hex8, parse_color};
use image::RgbaImage;

/// Cell pattern: 8 hex digits behind a hash.
const CELL_PATTERN: &str = "^#[0-9a-fA-F]{8}$";

/// Error type for payload validation and parsing failures.
///
/// All variants are recoverable; callers surface them as user feedback.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Not valid JSON, or JSON of the wrong shape.
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload dimensions don't match the target canvas.
    #[error("payload is {got_w}x{got_h}, canvas is {want_w}x{want_h}")]
    SizeMismatch { got_w: u32, got_h: u32, want_w: u32, want_h: u32 },
    /// Dimensions outside the supported canvas range.
    #[error("payload dimensions {w}x{h} outside supported range [{MIN_DIMENSION}, {MAX_DIMENSION}]")]
    BadDimensions { w: u32, h: u32 },
    /// Payload carries no frames at all.
    #[error("payload has no frames")]
    NoFrames,
    /// A frame has the wrong number of cells.
    #[error("frame {frame} has {got} cells, expected {expected}")]
    FrameLength { frame: usize, got: usize, expected: usize },
    /// A cell isn't an `#rrggbbaa` string.
    #[error("frame {frame} cell {cell}: '{value}' is not an 8-digit hex color")]
    BadCell { frame: usize, cell: usize, value: String },
}

/// The on-disk / clipboard frame document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Canvas width in cells.
    #[serde(alias = "width")]
    pub w: u32,
    /// Canvas height in cells.
    #[serde(alias = "height")]
    pub h: u32,
    /// One `w*h` row-major cell array per animation frame.
    pub frames: Vec<Vec<String>>,
}

impl Payload {
    /// Export every frame of a canvas as `#rrggbbaa` cell arrays.
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let frames = canvas
            .frames()
            .iter()
            .map(|frame| frame.pixels().map(|p| format_hex8(*p)).collect())
            .collect();
        Payload { w: canvas.width(), h: canvas.height(), frames }
    }

    /// Parse a payload from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Check this payload's internal consistency: at least one frame,
    /// every frame exactly `w*h` well-formed cells.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.w < MIN_DIMENSION
            || self.w > MAX_DIMENSION
            || self.h < MIN_DIMENSION
            || self.h > MAX_DIMENSION
        {
            return Err(PayloadError::BadDimensions { w: self.w, h: self.h });
        }
        if self.frames.is_empty() {
            return Err(PayloadError::NoFrames);
        }
        let expected = (self.w * self.h) as usize;
        let cell_re = Regex::new(CELL_PATTERN).expect("cell pattern is valid");
        for (fi, frame) in self.frames.iter().enumerate() {
            if frame.len() != expected {
                return Err(PayloadError::FrameLength {
                    frame: fi,
                    got: frame.len(),
                    expected,
                });
            }
            for (ci, cell) in frame.iter().enumerate() {
                if !cell_re.is_match(cell) {
                    return Err(PayloadError::BadCell {
                        frame: fi,
                        cell: ci,
                        value: cell.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check this payload against a target canvas size.
    pub fn validate_for(&self, w: u32, h: u32) -> Result<(), PayloadError> {
        if self.w != w || self.h != h {
            return Err(PayloadError::SizeMismatch {
                got_w: self.w,
                got_h: self.h,
                want_w: w,
                want_h: h,
            });
        }
        self.validate()
    }

    /// Overwrite the canvas's current frame with this payload's first
    /// frame (clipboard-paste semantics).
    ///
    /// The payload must match the canvas dimensions exactly.
    pub fn apply_to_current(&self, canvas: &mut Canvas) -> Result<(), PayloadError> {
        self.validate_for(canvas.width(), canvas.height())?;
        let frame = decode_frame(&self.frames[0], self.w, self.h);
        canvas.replace_current(frame);
        Ok(())
    }

    /// Build a whole canvas from this payload (project-file load).
    pub fn to_canvas(&self) -> Result<Canvas, PayloadError> {
        self.validate()?;
        let frames: Vec<RgbaImage> =
            self.frames.iter().map(|f| decode_frame(f, self.w, self.h)).collect();
        // Dimensions were validated, so construction cannot fail.
        Ok(Canvas::from_frames(self.w, self.h, frames)
            .unwrap_or_else(|| Canvas::new(self.w, self.h)))
    }
}

/// Decode one validated cell array into a frame buffer.
fn decode_frame(cells: &[String], w: u32, h: u32) -> RgbaImage {
    let mut frame = RgbaImage::new(w, h);
    for (i, cell) in cells.iter().enumerate() {
        let x = i as u32 % w;
        let y = i as u32 / w;
        if let Ok(color) = parse_color(cell) {
            frame.put_pixel(x, y, color);
        }
    }
    frame
}
