//! Result output port for presenting an analysis result.

use crate::domain::AnalysisResult;

/// Port for presenting analysis results to the user.
pub trait ResultOutput: Send + Sync {
    /// Renders the result for one analyzed image.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, result: &AnalysisResult) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
