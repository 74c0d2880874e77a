//! Decoding raw image bytes into in-memory rasters
//!
//! This module provides the single entry point for turning uploaded image
//! byte buffers into [`Raster`] values ready for feature extraction. All
//! standard formats supported by the `image` crate decode here (JPEG, PNG,
//! GIF, WebP, TIFF, BMP, and others); format detection runs on the byte
//! content, not a file name.
//!
//! A raster is immutable after load and owned exclusively by the extraction
//! call that decoded it. Decode failure is terminal for that image; the
//! loader never retries.

use image::{GrayImage, RgbImage};
use palette::Srgb;

use crate::error::{AnalysisError, Result};

/// A decoded image normalized to a 3-channel RGB pixel grid.
#[derive(Debug, Clone)]
pub struct Raster {
    rgb: RgbImage,
}

impl Raster {
    /// Wrap an already-decoded RGB buffer (synthetic inputs, tests)
    pub fn from_rgb(rgb: RgbImage) -> Self {
        Self { rgb }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    /// Color triple at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Srgb<u8> {
        let [r, g, b] = self.rgb.get_pixel(x, y).0;
        Srgb::new(r, g, b)
    }

    /// Borrow the underlying RGB buffer
    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Convert to a single-channel luminance image for texture and edge
    /// analysis
    pub fn to_luma(&self) -> GrayImage {
        image::imageops::grayscale(&self.rgb)
    }
}

/// Decode raw image bytes into a [`Raster`].
///
/// # Arguments
///
/// * `index` - Position of the image in the submitted batch, for error
///   reporting
/// * `bytes` - Raw encoded image bytes
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidImage`] if the bytes cannot be decoded as
/// a supported raster format.
pub fn load_raster(index: usize, bytes: &[u8]) -> Result<Raster> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::invalid_image(index, "Failed to decode image bytes", e))?;

    Ok(Raster {
        rgb: decoded.to_rgb8(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(image: RgbImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_load_raster_valid_png() {
        let image = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        let raster = load_raster(0, &png_bytes(image)).unwrap();

        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.pixel(0, 0), Srgb::new(10, 20, 30));
    }

    #[test]
    fn test_load_raster_invalid_bytes() {
        let result = load_raster(3, b"definitely not an image");

        match result.unwrap_err() {
            AnalysisError::InvalidImage { index, .. } => assert_eq!(index, 3),
            err => panic!("Expected InvalidImage, got: {:?}", err),
        }
    }

    #[test]
    fn test_load_raster_empty_bytes() {
        assert!(load_raster(0, &[]).is_err());
    }

    #[test]
    fn test_luma_of_white_is_white() {
        let raster = Raster::from_rgb(RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])));
        let luma = raster.to_luma();
        assert!(luma.pixels().all(|p| p.0[0] == 255));
    }
}
