//! # Image I/O
//!
//! Bridges image files and [`PixelGrid`]s using the `image` crate.
//!
//! Grids keep pixels in B, G, R order, so the first hidden bit of every pixel
//! lands in the blue channel. Loading drops any alpha channel. Saving always
//! produces PNG: a lossy format would destroy the LSBs the codec depends on.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use super::error::StegoError;
use super::grid::{Pixel, PixelGrid};

fn grid_from_rgb(img: RgbImage) -> Result<PixelGrid, StegoError> {
    let (width, height) = img.dimensions();
    let pixels: Vec<Pixel> = img.pixels().map(|&Rgb([r, g, b])| [b, g, r]).collect();
    PixelGrid::new(width, height, pixels)
}

fn rgb_from_grid(grid: &PixelGrid) -> Result<RgbImage, StegoError> {
    let raw: Vec<u8> = grid
        .pixels()
        .iter()
        .flat_map(|&[b, g, r]| [r, g, b])
        .collect();
    RgbImage::from_raw(grid.width(), grid.height(), raw).ok_or(StegoError::GridShape {
        expected: grid.width() as usize * grid.height() as usize,
        actual: grid.pixel_count(),
    })
}

/// Decode an image file held in memory (PNG, JPEG, ...) into a grid.
pub fn load_grid(bytes: &[u8]) -> Result<PixelGrid, StegoError> {
    let img = image::load_from_memory(bytes)?;
    grid_from_rgb(img.to_rgb8())
}

/// Decode an image file on disk into a grid. The format is guessed from the file contents.
pub fn load_grid_from_path(path: &Path) -> Result<PixelGrid, StegoError> {
    let img = image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?;
    grid_from_rgb(img.to_rgb8())
}

/// Serialize a grid as PNG bytes.
pub fn save_grid(grid: &PixelGrid) -> Result<Vec<u8>, StegoError> {
    let img = rgb_from_grid(grid)?;

    let mut output_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;

    Ok(output_bytes)
}

/// Write a grid to `path` as PNG, whatever the path's extension says.
pub fn save_grid_to_path(grid: &PixelGrid, path: &Path) -> Result<(), StegoError> {
    let img = rgb_from_grid(grid)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
