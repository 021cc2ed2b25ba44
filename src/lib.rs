//! LSB steganography: hide text in the least significant bits of an image's
//! pixel channels and serve encode/decode over HTTP.
//!
//! - [`processing`]: the pixel-grid codec and image file I/O
//! - [`server`]: the axum web service around it
//! - [`common`]: configuration, logging, and API message types

pub mod common;
pub mod processing;
pub mod server;
