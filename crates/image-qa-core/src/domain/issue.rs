//! Issue types flagged by the heuristic checks.

use serde::{Deserialize, Serialize};

/// A quality finding produced by a heuristic check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Kind of issue detected.
    pub kind: IssueKind,
    /// Measured signal that triggered the issue (Laplacian variance or mean brightness).
    pub metric: f64,
    /// Human-readable description including the measured value.
    pub message: String,
}

impl Issue {
    /// Creates a blur issue for the given Laplacian variance.
    #[must_use]
    pub fn blur(variance: f64) -> Self {
        Self {
            kind: IssueKind::Blur,
            metric: variance,
            message: format!("Potential Blur Detected (Variance: {variance:.2})"),
        }
    }

    /// Creates a darkness issue for the given mean brightness.
    #[must_use]
    pub fn darkness(brightness: f64) -> Self {
        Self {
            kind: IssueKind::Darkness,
            metric: brightness,
            message: format!("Potential Darkness Detected (Brightness: {brightness:.2})"),
        }
    }
}

/// The kind of quality issue.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Low edge energy (defocus or motion blur).
    Blur,
    /// Low average intensity.
    Darkness,
}
