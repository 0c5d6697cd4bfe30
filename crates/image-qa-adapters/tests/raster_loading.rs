//! Integration tests for raster image loading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use image_qa_adapters::{BytesImageSource, FsImageSource, STDIN_LABEL};
use image_qa_core::ImageSource;
use tempfile::TempDir;

fn sample_image() -> RgbImage {
    RgbImage::from_fn(8, 6, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([200, 180, 160])
        } else {
            Rgb([20, 30, 40])
        }
    })
}

fn write_fixture(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    sample_image()
        .save_with_format(&path, format)
        .expect("fixture should encode");
    path
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    sample_image().write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

#[test]
fn test_load_jpeg() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "test.jpg", ImageFormat::Jpeg);

    let info = FsImageSource::new(&path).load().expect("should load JPEG");
    assert_eq!(info.width, 8);
    assert_eq!(info.height, 6);
    assert!(info.source.ends_with("test.jpg"));
}

#[test]
fn test_load_png() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "test.png", ImageFormat::Png);

    let info = FsImageSource::new(&path).load().expect("should load PNG");
    assert_eq!(info.width, 8);
    assert_eq!(info.height, 6);
    assert!(info.source.ends_with("test.png"));
}

#[test]
fn test_png_pixels_preserved() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "exact.png", ImageFormat::Png);

    let info = FsImageSource::new(&path).load().unwrap();
    assert_eq!(info.to_rgb8(), sample_image());
}

#[test]
fn test_uppercase_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "UPPER.PNG", ImageFormat::Png);

    assert!(FsImageSource::new(&path).load().is_ok());
}

#[test]
fn test_missing_file() {
    let source = FsImageSource::new("/nonexistent/photo.jpg");
    let err = source.load().unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let err = FsImageSource::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
}

#[test]
fn test_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"\xFF\xD8\xFF truncated").unwrap();

    let err = FsImageSource::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("Failed to open image"));
}

#[test]
fn test_bytes_png() {
    let source = BytesImageSource::new(STDIN_LABEL, encode(ImageFormat::Png));

    let info = source.load().expect("should decode PNG bytes");
    assert_eq!(info.source, "<stdin>");
    assert_eq!((info.width, info.height), (8, 6));
}

#[test]
fn test_bytes_jpeg() {
    let source = BytesImageSource::new("upload.jpg", encode(ImageFormat::Jpeg));
    assert_eq!(source.load().unwrap().width, 8);
}

#[test]
fn test_bytes_wrong_format_rejected() {
    // GIF magic is recognized but not accepted
    let source = BytesImageSource::new("upload", b"GIF89a\x01\x00\x01\x00".to_vec());
    let err = source.load().unwrap_err();
    assert!(err.to_string().contains("Unsupported image format"));
}

#[test]
fn test_png_with_jpg_extension_decodes_by_content() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "mislabeled.jpg", ImageFormat::Png);

    let info = FsImageSource::new(&path)
        .load()
        .expect("PNG content should decode despite .jpg name");
    assert_eq!(info.to_rgb8(), sample_image());
}

#[test]
fn test_jpeg_with_png_extension_decodes_by_content() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "mislabeled.png", ImageFormat::Jpeg);

    let info = FsImageSource::new(&path).load().unwrap();
    assert_eq!((info.width, info.height), (8, 6));
}

#[test]
fn test_gif_content_with_png_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.png");
    std::fs::write(&path, b"GIF89a\x01\x00\x01\x00").unwrap();

    let err = FsImageSource::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("Unsupported image format"));
}
