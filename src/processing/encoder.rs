//! # LSB Encoder
//!
//! Writes a payload into the least significant bits of a [`PixelGrid`].
//!
//! ## Algorithm
//! 1. Expand payload + end marker into bits, MSB first
//! 2. Walk channels in scan order (row, column, channel 0 → 1 → 2)
//! 3. Replace each channel's LSB with the next bit: `(channel & 0xFE) | bit`
//! 4. Stop as soon as the last bit is written; later channels are untouched
//!
//! ## Capacity
//! A grid holds `3 × pixels` bits. Bitstreams longer than that are truncated to
//! what fits, which can cut off part or all of the end marker. No error is
//! raised; callers that care compare [`Payload::bitstream_len`] with
//! [`PixelGrid::capacity_bits`] or check the count returned by [`embed`].

use log::debug;

use super::error::StegoError;
use super::grid::PixelGrid;
use super::payload::Payload;

/// Embed `payload` into `grid` in place and return how many bits were written.
///
/// The return value is smaller than [`Payload::bitstream_len`] only when the
/// grid ran out of channels.
pub fn embed(grid: &mut PixelGrid, payload: &Payload) -> usize {
    let mut written = 0;

    for (channel, bit) in grid.channels_mut().zip(payload.bitstream()) {
        *channel = (*channel & 0xFE) | bit;
        written += 1;
    }

    debug!(
        "Embedded {}/{} bits into {} pixels",
        written,
        payload.bitstream_len(),
        grid.pixel_count()
    );

    written
}

/// Take ownership of `grid`, embed `payload`, and hand the grid back.
pub fn encode(mut grid: PixelGrid, payload: &Payload) -> PixelGrid {
    embed(&mut grid, payload);
    grid
}

/// Convert `text` to a [`Payload`] and encode it into `grid`.
///
/// # Errors
/// - [`StegoError::PayloadEncoding`] if `text` has a character above U+00FF
/// - [`StegoError::MarkerCollision`] if `text` contains U+00FF U+00FE
pub fn encode_text(grid: PixelGrid, text: &str) -> Result<PixelGrid, StegoError> {
    let payload = Payload::from_text(text)?;
    Ok(encode(grid, &payload))
}
