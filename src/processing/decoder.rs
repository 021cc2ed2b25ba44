//! # LSB Decoder
//!
//! Recovers a payload from the least significant bits of a [`PixelGrid`].
//!
//! ## Algorithm
//! 1. Read the LSB of every channel in the encoder's scan order
//! 2. Pack bits into bytes, MSB first; a trailing group shorter than 8 bits is discarded
//! 3. Scan the bytes with a two-byte window and stop before the first `0xFF 0xFE`
//! 4. Without a marker, keep every byte except a lone final `0xFF`, which may be
//!    the first half of a marker that did not fit
//!
//! Decoding never fails. A grid that was never encoded, or that went through a
//! lossy format after encoding, yields whatever bytes its LSBs happen to spell.

use super::grid::PixelGrid;
use super::payload::{Payload, END_MARKER};

/// Collect channel LSBs into whole bytes, MSB first.
fn extract_bytes(grid: &PixelGrid) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(grid.capacity_bits() / 8);
    let mut current = 0u8;
    let mut filled = 0;

    for channel in grid.channels() {
        current = (current << 1) | (channel & 1);
        filled += 1;
        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }

    bytes
}

/// Length of the payload prefix of `bytes`.
fn payload_len(bytes: &[u8]) -> usize {
    if let Some(position) = bytes.windows(2).position(|pair| pair == END_MARKER) {
        return position;
    }

    match bytes.last() {
        Some(&last) if last == END_MARKER[0] => bytes.len() - 1,
        _ => bytes.len(),
    }
}

/// Extract the payload hidden in `grid`.
pub fn decode(grid: &PixelGrid) -> Payload {
    let mut bytes = extract_bytes(grid);
    bytes.truncate(payload_len(&bytes));
    Payload::from_decoded(bytes)
}

/// Extract the payload hidden in `grid` as text, one character per byte.
pub fn decode_text(grid: &PixelGrid) -> String {
    decode(grid).to_text()
}
