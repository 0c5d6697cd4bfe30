//! Filesystem and in-memory adapters for loading images.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::{ImageFormat, ImageReader};
use image_qa_core::{ImageInfo, ImageSource};
use tracing::debug;

/// Extensions accepted for upload.
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Source label used for images read from standard input.
pub const STDIN_LABEL: &str = "<stdin>";

/// Filesystem image source adapter.
pub struct FsImageSource {
    path: PathBuf,
}

impl FsImageSource {
    /// Creates a source for a single image file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FsImageSource {
    fn load(&self) -> Result<ImageInfo> {
        let path = &self.path;
        if !path.is_file() {
            bail!("Image not found: {}", path.display());
        }
        if !is_supported_image(path) {
            bail!(
                "Unsupported file type: {} (expected one of: {})",
                path.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            );
        }

        // Decode by content; the extension only gates what is accepted
        let reader = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        ensure_supported(reader.format(), &path.display().to_string())?;

        let image = reader
            .decode()
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        let info = ImageInfo::new(path.to_string_lossy(), image);
        debug!("Loaded {} ({}x{})", info.source, info.width, info.height);
        Ok(info)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory image source for raw uploaded bytes.
pub struct BytesImageSource {
    label: String,
    bytes: Vec<u8>,
}

impl BytesImageSource {
    /// Creates a source over encoded image bytes.
    #[must_use]
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }

    /// Reads all of standard input.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub fn from_stdin() -> Result<Self> {
        use std::io::Read;

        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read image from stdin")?;
        Ok(Self::new(STDIN_LABEL, bytes))
    }
}

impl ImageSource for BytesImageSource {
    fn load(&self) -> Result<ImageInfo> {
        if self.bytes.is_empty() {
            bail!("No image data in {}", self.label);
        }

        let format = image::guess_format(&self.bytes)
            .with_context(|| format!("Unrecognized image data in {}", self.label))?;
        ensure_supported(Some(format), &self.label)?;

        let image = image::load_from_memory_with_format(&self.bytes, format)
            .with_context(|| format!("Failed to decode image: {}", self.label))?;
        let info = ImageInfo::new(self.label.clone(), image);
        debug!(
            "Decoded {} bytes from {} ({}x{})",
            self.bytes.len(),
            info.source,
            info.width,
            info.height
        );
        Ok(info)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Rejects decoded formats other than JPEG and PNG.
fn ensure_supported(format: Option<ImageFormat>, label: &str) -> Result<()> {
    match format {
        Some(ImageFormat::Jpeg | ImageFormat::Png) => Ok(()),
        Some(other) => bail!("Unsupported image format {other:?} in {label}"),
        None => bail!("Unrecognized image data in {label}"),
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}
