//! Heuristic check implementations.
//!
//! Each check implements the `QaModule` trait over a shared grayscale field.

mod blur;
mod darkness;
mod grayscale;
mod heuristics;

pub use blur::{laplacian_variance, BlurConfig, BlurModule, DEFAULT_BLUR_VARIANCE_THRESHOLD};
pub use darkness::{DarknessConfig, DarknessModule, Histogram, DEFAULT_DARKNESS_THRESHOLD};
pub use grayscale::GrayscaleField;
pub use heuristics::HeuristicAnalyzer;
