//! Animated GIF assembly
//!
//! Builds a complete GIF89a byte stream from a frame sequence: logical
//! screen descriptor, the fixed 256-entry global color table, a NETSCAPE
//! looping extension, then per frame a graphic control block (delay +
//! transparency on palette slot 0), an image descriptor, and the
//! sub-block-chunked LZW index stream. Any conforming decoder can play the
//! result.

use image::RgbaImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::lzw;
use crate::output::{ensure_parent_dir, OutputError};
use crate::palette::Palette;

/// GIF delays are in hundredths of a second; 2 is the floor most players
/// honor, capping the effective frame rate at 50fps.
pub const MIN_DELAY_CS: u16 = 2;

/// Longest payload of one image-data sub-block.
const SUB_BLOCK_SIZE: usize = 255;

/// Convert a requested frame rate into a GIF frame delay in centiseconds.
pub fn frame_delay_cs(fps: u32) -> u16 {
    let fps = fps.max(1);
    ((100.0 / fps as f64).round() as u16).max(MIN_DELAY_CS)
}

/// Encode a frame sequence as a complete animated GIF byte stream.
///
/// Frames must all be `width`x`height`; each is quantized through the
/// fixed global palette in row-major order. The animation loops
/// indefinitely with the same delay on every frame.
pub fn encode_animation(frames: &[RgbaImage], fps: u32) -> Vec<u8> {
    let palette = Palette::global();
    let (width, height) =
        frames.first().map(|f| f.dimensions()).unwrap_or((1, 1));
    let delay_cs = frame_delay_cs(fps);

    let mut out = Vec::new();

    // Header and logical screen descriptor: global color table present,
    // 8 bits per channel, 256 entries (packed field 0x87).
    out.extend_from_slice(b"GIF89a");
    push_u16_le(&mut out, width as u16);
    push_u16_le(&mut out, height as u16);
    out.push(0b1000_0111);
    out.push(0x00); // background color index
    out.push(0x00); // pixel aspect ratio

    for entry in palette.entries() {
        out.extend_from_slice(entry);
    }

    // NETSCAPE2.0 application extension: loop forever.
    out.extend_from_slice(&[
        0x21, 0xFF, 0x0B, b'N', b'E', b'T', b'S', b'C', b'A', b'P', b'E', b'2', b'.', b'0',
        0x03, 0x01, 0x00, 0x00, 0x00,
    ]);

    for frame in frames {
        // Graphic control: disposal 2, transparent color flag set, slot 0.
        out.extend_from_slice(&[0x21, 0xF9, 0x04, 0b0000_1001]);
        push_u16_le(&mut out, delay_cs);
        out.push(0x00); // transparent color index
        out.push(0x00); // block terminator

        // Image descriptor at the origin, full frame, no local table.
        out.push(0x2C);
        push_u16_le(&mut out, 0);
        push_u16_le(&mut out, 0);
        push_u16_le(&mut out, width as u16);
        push_u16_le(&mut out, height as u16);
        out.push(0x00);

        let indices: Vec<u8> = frame.pixels().map(|p| palette.quantize(*p)).collect();
        let compressed = lzw::compress(&indices);

        out.push(lzw::MIN_CODE_SIZE);
        for chunk in compressed.chunks(SUB_BLOCK_SIZE) {
            out.push(chunk.len() as u8);
            out.extend_from_slice(chunk);
        }
        out.push(0x00); // sub-block terminator
    }

    out.push(0x3B); // trailer
    out
}

/// Encode an animation and write it to disk, creating parent directories.
///
/// An empty frame list writes nothing and succeeds (there is nothing to
/// animate).
pub fn render_gif(frames: &[RgbaImage], fps: u32, path: &Path) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Ok(());
    }

    ensure_parent_dir(path)?;

    let bytes = encode_animation(frames, fps);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

fn push_u16_le(out: &mut Vec<u8>, v: u16) {
    out.push((v & 0xFF) as u8);
    out.push((v >> 8) as u8);
}
