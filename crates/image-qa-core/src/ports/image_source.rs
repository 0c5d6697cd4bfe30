//! Image source port for obtaining the decoded image to analyze.

use crate::domain::ImageInfo;

/// Port for loading the single image an analysis runs on.
pub trait ImageSource: Send + Sync {
    /// Decodes the image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or decoded.
    fn load(&self) -> anyhow::Result<ImageInfo>;

    /// Human-readable description of where the image comes from.
    fn describe(&self) -> String;
}
