//! Darkness detection module.
//!
//! Flags images whose mean intensity falls below a fixed level on the
//! 0-255 scale.

use tracing::debug;

use super::GrayscaleField;
use crate::domain::{Issue, QaModule};

/// Mean brightness below this value is flagged as dark.
pub const DEFAULT_DARKNESS_THRESHOLD: f64 = 70.0;

/// Configuration for darkness detection.
#[derive(Debug, Clone)]
pub struct DarknessConfig {
    /// Images with a mean intensity strictly below this are flagged.
    pub brightness_threshold: f64,
}

impl Default for DarknessConfig {
    fn default() -> Self {
        Self {
            brightness_threshold: DEFAULT_DARKNESS_THRESHOLD,
        }
    }
}

/// 256-bin histogram of intensity values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Compute histogram from a grayscale field.
    #[must_use]
    pub fn from_field(field: &GrayscaleField) -> Self {
        let mut bins = [0u64; 256];
        for &value in field.as_slice() {
            bins[usize::from(value)] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Calculate mean intensity.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }
}

/// Darkness detection QA module.
pub struct DarknessModule {
    config: DarknessConfig,
}

impl DarknessModule {
    /// Creates a new darkness detection module with the given configuration.
    #[must_use]
    pub const fn new(config: DarknessConfig) -> Self {
        Self { config }
    }
}

impl Default for DarknessModule {
    fn default() -> Self {
        Self::new(DarknessConfig::default())
    }
}

impl QaModule for DarknessModule {
    fn name(&self) -> &'static str {
        "darkness"
    }

    fn check(&self, field: &GrayscaleField) -> Option<Issue> {
        let brightness = Histogram::from_field(field).mean();
        debug!(
            brightness,
            threshold = self.config.brightness_threshold,
            "Mean brightness"
        );

        (brightness < self.config.brightness_threshold).then(|| Issue::darkness(brightness))
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::domain::IssueKind;
    use image::{DynamicImage, GrayImage, Luma};

    fn uniform(value: u8) -> GrayscaleField {
        GrayscaleField::from_image(&DynamicImage::ImageLuma8(GrayImage::from_pixel(
            40,
            30,
            Luma([value]),
        )))
    }

    #[test]
    fn test_default_config() {
        let config = DarknessConfig::default();
        assert!((config.brightness_threshold - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_module_name() {
        assert_eq!(DarknessModule::default().name(), "darkness");
    }

    #[test]
    fn test_histogram_mean() {
        let img = GrayImage::from_fn(256, 4, |x, _| Luma([x as u8]));
        let field = GrayscaleField::from_image(&DynamicImage::ImageLuma8(img));
        let hist = Histogram::from_field(&field);

        assert_eq!(hist.total(), 1024);
        assert!((hist.mean() - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_histogram_mean() {
        let hist = Histogram {
            bins: [0u64; 256],
            total: 0,
        };
        assert!(hist.mean().abs() < f64::EPSILON);
    }

    #[test]
    fn test_white_not_dark() {
        assert!(DarknessModule::default().check(&uniform(255)).is_none());
    }

    #[test]
    fn test_very_dark_flagged() {
        let issue = DarknessModule::default()
            .check(&uniform(10))
            .expect("mean 10 should be dark");
        assert_eq!(issue.kind, IssueKind::Darkness);
        assert!((issue.metric - 10.0).abs() < f64::EPSILON);
        assert_eq!(
            issue.message,
            "Potential Darkness Detected (Brightness: 10.00)"
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let module = DarknessModule::default();
        assert!(module.check(&uniform(70)).is_none(), "70 is not < 70");
        assert!(module.check(&uniform(69)).is_some());
    }

    #[test]
    fn test_custom_threshold() {
        let module = DarknessModule::new(DarknessConfig {
            brightness_threshold: 5.0,
        });
        assert!(module.check(&uniform(10)).is_none());
    }
}
