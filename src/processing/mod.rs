//! # Image Processing and Steganography
//!
//! Hides text in the least significant bits of an image's pixel channels and
//! recovers it again.
//!
//! - [`grid`]: the in-memory pixel model both directions work on
//! - [`payload`]: text ↔ bytes conversion, end marker, bitstream expansion
//! - [`encoder`] / [`decoder`]: the LSB codec itself
//! - [`image_io`]: loading and saving grids as image files
//!
//! The codec is pure and synchronous; it never touches the filesystem.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod image_io;
pub mod payload;

// Re-export main functions for convenience
pub use decoder::{decode, decode_text};
pub use encoder::{embed, encode, encode_text};
pub use error::StegoError;
pub use grid::{Pixel, PixelGrid};
pub use payload::{Payload, END_MARKER};
