//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use image_qa_core::domain::ImageInfo;

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images with known blur and
/// brightness characteristics.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a black/white checkerboard with 8px cells (very sharp edges).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_levels(width, height, 8, 0, 255)
    }

    /// Creates a checkerboard with custom cell size and intensity levels.
    #[must_use]
    pub fn checkerboard_with_levels(
        width: u32,
        height: u32,
        cell_size: u32,
        dark: u8,
        light: u8,
    ) -> ImageInfo {
        let cell = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([light])
            } else {
                Luma([dark])
            }
        });
        ImageInfo::new("synthetic://checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Creates a color checkerboard (sharp, RGB source).
    #[must_use]
    pub fn rgb_checkerboard(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb([250, 240, 230])
            } else {
                Rgb([20, 10, 40])
            }
        });
        ImageInfo::new("synthetic://rgb_checkerboard", DynamicImage::ImageRgb8(img))
    }

    // === Blurry / Flat Images ===

    /// Creates a uniform gray image (no edges).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_pixel(width, height, Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a uniform RGB image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }

    /// Creates a smooth horizontal gradient (edge-free, bright on average).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        ImageInfo::new(
            "synthetic://horizontal_gradient",
            DynamicImage::ImageLuma8(img),
        )
    }

    // === Brightness Images ===

    /// Creates a pure white image.
    #[must_use]
    pub fn white(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 255)
    }

    /// Creates a uniformly dark image at the given intensity.
    #[must_use]
    pub fn dark(width: u32, height: u32, value: u8) -> ImageInfo {
        Self::uniform_gray(width, height, value)
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> ImageInfo {
        Self::uniform_gray(1, 1, value)
    }
}

/// Convenience functions for common test images.
impl SyntheticImageBuilder {
    /// Returns a sharp, bright test image (128x128 checkerboard).
    #[must_use]
    pub fn sharp_image() -> ImageInfo {
        Self::checkerboard(128, 128)
    }

    /// Returns a flat mid-gray test image (blurry, not dark).
    #[must_use]
    pub fn blurry_image() -> ImageInfo {
        Self::uniform_gray(128, 128, 128)
    }

    /// Returns a flat, very dark test image (blurry and dark).
    #[must_use]
    pub fn dark_image() -> ImageInfo {
        Self::dark(128, 128, 10)
    }
}
