//! Fixed 256-entry export palette and RGBA quantizer.
//!
//! The palette is deterministic and immutable: index 0 is black and doubles
//! as the transparent slot, 1..=216 hold the 6-level color cube (channel
//! levels 0,51,102,153,204,255 — red outermost, blue innermost), 217..=240
//! a 24-step grayscale ramp, and the remainder black padding. Every encode
//! reuses the same table.

use image::Rgba;

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 256;
/// Palette slot reserved for transparency.
pub const TRANSPARENT_INDEX: u8 = 0;
/// Alpha values below this quantize to the transparent slot.
pub const ALPHA_THRESHOLD: u8 = 128;

/// The 6 quantization levels per channel.
const LEVELS: [u8; 6] = [0, 51, 102, 153, 204, 255];

/// The fixed global color table used by every animation encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [[u8; 3]; PALETTE_SIZE],
}

impl Palette {
    /// Build the global palette. Deterministic; identical every call.
    pub fn global() -> Self {
        let mut entries = [[0u8; 3]; PALETTE_SIZE];
        let mut i = 1;
        for r in LEVELS {
            for g in LEVELS {
                for b in LEVELS {
                    entries[i] = [r, g, b];
                    i += 1;
                }
            }
        }
        for step in 0..24 {
            let v = (step as f64 * 255.0 / 23.0).round() as u8;
            entries[i] = [v, v, v];
            i += 1;
        }
        // Remaining entries stay black padding.
        Palette { entries }
    }

    /// The RGB triple at `index`.
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.entries[index as usize]
    }

    /// The raw 256x3 table in index order (global color table bytes).
    pub fn entries(&self) -> &[[u8; 3]; PALETTE_SIZE] {
        &self.entries
    }

    /// Map an RGBA pixel to its palette index.
    ///
    /// Pixels with alpha below [`ALPHA_THRESHOLD`] map straight to the
    /// transparent slot. Opaque pixels round each channel to the nearest
    /// quantization level and jump directly to the matching cube entry;
    /// if that entry disagrees with the rounded triple, the match falls
    /// back to an exhaustive nearest-neighbor scan over entries 1..=255,
    /// first match winning ties.
    pub fn quantize(&self, pixel: Rgba<u8>) -> u8 {
        let Rgba([r, g, b, a]) = pixel;
        if a < ALPHA_THRESHOLD {
            return TRANSPARENT_INDEX;
        }

        let level = |v: u8| (v as f64 / 51.0).round() as u8;
        let (ri, gi, bi) = (level(r), level(g), level(b));
        let fast = 1 + (ri as usize * 6 + gi as usize) * 6 + bi as usize;
        if self.entries[fast] == [ri * 51, gi * 51, bi * 51] {
            return fast as u8;
        }

        let mut best_index = 1usize;
        let mut best_dist = u32::MAX;
        for (i, entry) in self.entries.iter().enumerate().skip(1) {
            let d = dist2([r, g, b], *entry);
            if d < best_dist {
                best_dist = d;
                best_index = i;
                if d == 0 {
                    break;
                }
            }
        }
        best_index as u8
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::global()
    }
}

/// Squared Euclidean distance between two RGB triples.
fn dist2(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}
