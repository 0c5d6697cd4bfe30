//! Classifier verdict types.

use serde::{Deserialize, Serialize};

use super::Issue;

/// Binary quality label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    /// Classifier score above the decision threshold.
    Good,
    /// Classifier score at or below the decision threshold.
    Bad,
}

impl QualityLabel {
    /// Returns the lowercase word used in reports ("good" or "bad").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => f.write_str("Good Quality"),
            Self::Bad => f.write_str("Bad Quality"),
        }
    }
}

/// Final verdict for a single image.
///
/// Built by [`crate::compose`]; the fields cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    label: QualityLabel,
    confidence: f32,
    score: f32,
    issues: Vec<Issue>,
}

impl Verdict {
    pub(crate) const fn new(
        label: QualityLabel,
        confidence: f32,
        score: f32,
        issues: Vec<Issue>,
    ) -> Self {
        Self {
            label,
            confidence,
            score,
            issues,
        }
    }

    /// Good or Bad.
    #[must_use]
    pub const fn label(&self) -> QualityLabel {
        self.label
    }

    /// Confidence in the label, in `[0.5, 1.0]`.
    #[must_use]
    pub const fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Raw classifier score the verdict was derived from.
    #[must_use]
    pub const fn score(&self) -> f32 {
        self.score
    }

    /// Heuristic issues in detection order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns true when the label is [`QualityLabel::Good`].
    #[must_use]
    pub fn is_good(&self) -> bool {
        self.label == QualityLabel::Good
    }
}
