//! Single-channel intensity field shared by the heuristic checks.

use image::DynamicImage;

/// Fixed-point BT.601 luma weights (scaled by 2^14).
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Grayscale intensity grid with the same dimensions as its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleField {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayscaleField {
    /// Converts an image to 8-bit intensity using `0.299 R + 0.587 G + 0.114 B`.
    ///
    /// Any color mode is first brought to 8-bit RGB; alpha is discarded.
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let data = rgb.pixels().map(|p| luma(p.0)).collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Field width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Field height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major intensity values.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Intensity at `(x, y)`. Coordinates must be in bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width as usize + x]
    }
}

#[allow(clippy::cast_possible_truncation)]
fn luma([r, g, b]: [u8; 3]) -> u8 {
    let weighted =
        u32::from(r) * R_WEIGHT + u32::from(g) * G_WEIGHT + u32::from(b) * B_WEIGHT + ROUND;
    // Weights sum to 2^14, so the shifted value never exceeds 255
    (weighted >> SHIFT) as u8
}
