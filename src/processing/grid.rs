//! # Pixel Grid
//!
//! In-memory pixel model shared by the encoder and decoder.
//!
//! Pixels are stored row-major with exactly three channels each, kept in the
//! B, G, R order images are loaded in. The codec never interprets the channels;
//! it only relies on the scan order exposed by [`PixelGrid::channels`] and
//! [`PixelGrid::channels_mut`]:
//!
//! ```text
//! row 0: (0,0)[0] (0,0)[1] (0,0)[2] (1,0)[0] ... (w-1,0)[2]
//! row 1: (0,1)[0] ...
//! ```

use super::error::StegoError;

/// Number of channels carried by every pixel.
pub const CHANNELS: usize = 3;

/// A single pixel: three 8-bit channel values in B, G, R order.
pub type Pixel = [u8; CHANNELS];

/// A `height × width` grid of pixels stored in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Build a grid from a row-major pixel buffer.
    ///
    /// # Errors
    /// - [`StegoError::GridShape`] if `pixels.len() != width * height`
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, StegoError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(StegoError::GridShape {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// How many bits the grid can carry: one per channel.
    pub fn capacity_bits(&self) -> usize {
        self.pixels.len() * CHANNELS
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Channel values in scan order: row, then column, then channel 0, 1, 2.
    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(|pixel| pixel.iter().copied())
    }

    /// Mutable channel values in the same scan order as [`channels`](Self::channels).
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut u8> + '_ {
        self.pixels.iter_mut().flat_map(|pixel| pixel.iter_mut())
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}
