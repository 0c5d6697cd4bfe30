//! Image normalization for classifier input.

use anyhow::{Context, Result};
use candle_core::{Device, Tensor};
use image::imageops::FilterType;
use image::DynamicImage;

/// Side length of the square classifier input.
pub const INPUT_SIZE: u32 = 224;

/// Shape of the classifier input: batch, height, width, channels.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3];

/// Resampling filter used to reach [`INPUT_SIZE`] (bicubic).
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Converts a decoded image into the `(1, 224, 224, 3)` tensor the classifier expects.
///
/// The image is converted to 8-bit RGB, stretched to 224x224 without
/// preserving aspect ratio, and each channel is divided by 255.
///
/// # Errors
///
/// Returns an error if the tensor cannot be allocated on `device`.
pub fn preprocess(image: &DynamicImage, device: &Device) -> Result<Tensor> {
    let rgb = image.to_rgb8();
    let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, RESIZE_FILTER);

    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / 255.0)
        .collect();

    let [batch, height, width, channels] = INPUT_SHAPE;
    Tensor::from_vec(data, (batch, height, width, channels), device)
        .context("Failed to create input tensor")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn values(tensor: &Tensor) -> Vec<f32> {
        tensor
            .flatten_all()
            .and_then(|t| t.to_vec1::<f32>())
            .expect("tensor values")
    }

    fn assert_normalized(image: &DynamicImage) {
        let tensor = preprocess(image, &Device::Cpu).expect("preprocess");
        assert_eq!(tensor.dims(), &INPUT_SHAPE);
        assert_eq!(tensor.dtype(), candle_core::DType::F32);
        assert!(values(&tensor).iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_shape_for_various_sizes() {
        for (w, h) in [(1, 1), (224, 224), (640, 480), (31, 977), (1000, 3)] {
            let img = RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 7]));
            assert_normalized(&DynamicImage::ImageRgb8(img));
        }
    }

    #[test]
    fn test_single_channel_input() {
        let img = GrayImage::from_fn(300, 200, |x, _| Luma([(x % 256) as u8]));
        assert_normalized(&DynamicImage::ImageLuma8(img));
    }

    #[test]
    fn test_rgba_input() {
        let img = RgbaImage::from_pixel(50, 80, Rgba([255, 0, 0, 10]));
        assert_normalized(&DynamicImage::ImageRgba8(img));
    }

    #[test]
    fn test_scaling_extremes() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([255, 255, 255])));
        let tensor = preprocess(&white, &Device::Cpu).expect("preprocess");
        assert!(values(&tensor).iter().all(|&v| (v - 1.0).abs() < 1e-6));

        let black = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let tensor = preprocess(&black, &Device::Cpu).expect("preprocess");
        assert!(values(&tensor).iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn test_channel_last_order() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(224, 224, Rgb([255, 0, 51])));
        let tensor = preprocess(&img, &Device::Cpu).expect("preprocess");
        let v = values(&tensor);

        assert!((v[0] - 1.0).abs() < 1e-6);
        assert!(v[1].abs() < 1e-6);
        assert!((v[2] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(97, 53, |x, y| {
            Rgb([(x * 2) as u8, (y * 4) as u8, ((x + y) % 256) as u8])
        }));
        let a = values(&preprocess(&img, &Device::Cpu).expect("preprocess"));
        let b = values(&preprocess(&img, &Device::Cpu).expect("preprocess"));
        assert_eq!(a, b);
    }
}
