//! QA module trait for the heuristic checks.

use super::Issue;
use crate::modules::GrayscaleField;

/// A single heuristic quality check.
///
/// Checks operate on a precomputed [`GrayscaleField`] so the intensity
/// conversion happens once per image. A check cannot fail: it either
/// flags an issue or it does not.
pub trait QaModule: Send + Sync {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Runs the check, returning an issue if the image is flagged.
    fn check(&self, field: &GrayscaleField) -> Option<Issue>;
}
