//! GIF-flavor LZW compression over palette-index streams.
//!
//! Fixed 8-bit minimum code size (256-symbol alphabet), CLEAR=256, END=257,
//! variable code width 9..=12 bits, LSB-first bit packing. The code stream
//! opens with CLEAR; the dictionary resets (another CLEAR) whenever it
//! reaches 4096 entries mid-stream. Dictionary strings are represented as
//! (prefix code, extension symbol) pairs; literal symbols are their own
//! codes, so no explicit initial table is stored.

use std::collections::HashMap;

/// GIF minimum LZW code size for a 256-color image.
pub const MIN_CODE_SIZE: u8 = 8;

const CLEAR_CODE: u16 = 256;
const END_CODE: u16 = 257;
const FIRST_FREE_CODE: u16 = END_CODE + 1;
const MAX_DICT_SIZE: u16 = 4096;
const MAX_CODE_WIDTH: u32 = 12;

/// LSB-first bit packer; codes straddle byte boundaries.
#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    acc: u32,
    filled: u32,
}

impl BitWriter {
    fn push(&mut self, code: u16, width: u32) {
        self.acc |= (code as u32) << self.filled;
        self.filled += width;
        while self.filled >= 8 {
            self.bytes.push((self.acc & 0xFF) as u8);
            self.acc >>= 8;
            self.filled -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.bytes.push((self.acc & 0xFF) as u8);
        }
        self.bytes
    }
}

/// Compress a palette-index stream into packed LZW bytes.
///
/// The output is the raw code stream (no sub-block framing); the animation
/// encoder chunks it into length-prefixed sub-blocks. An empty input
/// yields just CLEAR followed by END.
pub fn compress(indices: &[u8]) -> Vec<u8> {
    let mut out = BitWriter::default();
    let mut dict: HashMap<(u16, u8), u16> = HashMap::new();
    let mut width: u32 = MIN_CODE_SIZE as u32 + 1;
    let mut next_code = FIRST_FREE_CODE;

    out.push(CLEAR_CODE, width);

    let Some((&first, rest)) = indices.split_first() else {
        out.push(END_CODE, width);
        return out.finish();
    };

    let mut prefix = first as u16;
    for &symbol in rest {
        if let Some(&code) = dict.get(&(prefix, symbol)) {
            prefix = code;
            continue;
        }

        out.push(prefix, width);
        dict.insert((prefix, symbol), next_code);
        next_code += 1;
        // Widen exactly when the next assignable code would overflow.
        if u32::from(next_code) == 1 << width && width < MAX_CODE_WIDTH {
            width += 1;
        }
        prefix = symbol as u16;

        if next_code == MAX_DICT_SIZE {
            out.push(CLEAR_CODE, width);
            dict.clear();
            width = MIN_CODE_SIZE as u32 + 1;
            next_code = FIRST_FREE_CODE;
        }
    }

    out.push(prefix, width);
    out.push(END_CODE, width);
    out.finish()
}
