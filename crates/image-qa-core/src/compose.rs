//! Merges the classifier score and heuristic issues into a verdict.

use crate::domain::{Issue, QualityLabel, Verdict};

/// Scores strictly above this value are labelled Good.
pub const DEFAULT_GOOD_THRESHOLD: f32 = 0.5;

/// Builds the verdict for a classifier score and the heuristic issues.
///
/// `score > threshold` yields [`QualityLabel::Good`] with confidence `score`;
/// anything else yields [`QualityLabel::Bad`] with confidence `1 - score`.
/// Issues are kept in the order they were detected.
#[must_use]
pub fn compose(score: f32, issues: Vec<Issue>, threshold: f32) -> Verdict {
    if score > threshold {
        Verdict::new(QualityLabel::Good, score, score, issues)
    } else {
        Verdict::new(QualityLabel::Bad, 1.0 - score, score, issues)
    }
}
