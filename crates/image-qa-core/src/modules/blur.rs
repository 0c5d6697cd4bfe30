//! Blur detection module.
//!
//! Scores sharpness as the variance of the Laplacian response over the
//! whole grayscale field. Sharp images carry high-frequency edges and a
//! high variance; blur suppresses them.

use tracing::debug;

use super::GrayscaleField;
use crate::domain::{Issue, QaModule};

/// Laplacian variance below this value is flagged as blur.
pub const DEFAULT_BLUR_VARIANCE_THRESHOLD: f64 = 100.0;

/// Configuration for blur detection.
#[derive(Debug, Clone)]
pub struct BlurConfig {
    /// Images with a Laplacian variance strictly below this are flagged.
    pub variance_threshold: f64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            variance_threshold: DEFAULT_BLUR_VARIANCE_THRESHOLD,
        }
    }
}

/// Blur detection QA module.
pub struct BlurModule {
    config: BlurConfig,
}

impl BlurModule {
    /// Creates a new blur detection module with the given configuration.
    #[must_use]
    pub const fn new(config: BlurConfig) -> Self {
        Self { config }
    }
}

impl Default for BlurModule {
    fn default() -> Self {
        Self::new(BlurConfig::default())
    }
}

impl QaModule for BlurModule {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn check(&self, field: &GrayscaleField) -> Option<Issue> {
        let variance = laplacian_variance(field);
        debug!(
            variance,
            threshold = self.config.variance_threshold,
            "Laplacian variance"
        );

        (variance < self.config.variance_threshold).then(|| Issue::blur(variance))
    }
}

/// Population variance of the 4-neighbour Laplacian over every pixel.
///
/// Kernel `[0, 1, 0; 1, -4, 1; 0, 1, 0]`, borders mirrored without
/// repeating the edge pixel (reflect-101). Returns 0 for an empty field.
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
#[must_use]
pub fn laplacian_variance(field: &GrayscaleField) -> f64 {
    let width = field.width() as usize;
    let height = field.height() as usize;
    if width == 0 || height == 0 {
        return 0.0;
    }

    let mut responses = Vec::with_capacity(width * height);
    for y in 0..height {
        let up = reflect_101(y, -1, height);
        let down = reflect_101(y, 1, height);
        for x in 0..width {
            let left = reflect_101(x, -1, width);
            let right = reflect_101(x, 1, width);

            let neighbours = f64::from(field.get(x, up))
                + f64::from(field.get(x, down))
                + f64::from(field.get(left, y))
                + f64::from(field.get(right, y));
            responses.push(neighbours - 4.0 * f64::from(field.get(x, y)));
        }
    }

    let n = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / n;
    responses
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / n
}

/// Offsets `index` by `delta` (±1), mirroring around the edge pixel.
const fn reflect_101(index: usize, delta: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    match (index, delta) {
        (0, -1) => 1,
        (i, 1) if i + 1 == len => len - 2,
        (i, d) if d < 0 => i - 1,
        (i, _) => i + 1,
    }
}
