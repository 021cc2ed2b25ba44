//! # Codec Errors
//!
//! Failure modes of the steganography layer. Decoding itself never fails: every
//! variant here comes from payload validation, grid construction, or the image
//! I/O collaborator.

use thiserror::Error;

/// Errors raised while preparing a payload, building a grid, or reading and
/// writing image files.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The text contains a character that does not fit in a single byte.
    #[error("character {character:?} at position {position} is outside the single-byte range 0-255")]
    PayloadEncoding { character: char, position: usize },

    /// The payload contains the end marker byte pair and would be cut short on decode.
    #[error("payload contains the end marker sequence 0xFF 0xFE at byte {position}")]
    MarkerCollision { position: usize },

    /// A pixel buffer does not match the declared grid dimensions.
    #[error("pixel buffer holds {actual} pixels but the grid needs {expected}")]
    GridShape { expected: usize, actual: usize },

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
