//! Human-readable report output.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use image_qa_core::{AnalysisResult, QualityLabel, ResultOutput, Verdict};

/// Marker printed before each flagged issue.
const ISSUE_MARKER: &str = "⚠️";

/// Writes the plain-text analysis report.
pub struct TextReport {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextReport {
    /// Creates a report writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a report writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

/// Renders the report for one result.
pub fn render(result: &AnalysisResult) -> String {
    let verdict = &result.verdict;
    let mut lines = vec![
        format!(
            "Analysis Results: {} ({}x{})",
            result.source, result.dimensions.width, result.dimensions.height
        ),
        format!("Result: {}", verdict.label()),
        String::new(),
        confidence_line(verdict),
    ];

    if verdict.issues().is_empty() {
        lines.push(no_issues_line(verdict.label()).to_string());
    } else {
        lines.push("Further analysis found these potential issues:".to_string());
        lines.extend(
            verdict
                .issues()
                .iter()
                .map(|issue| format!("{ISSUE_MARKER} {}", issue.message)),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn confidence_line(verdict: &Verdict) -> String {
    format!(
        "The model is {}% confident this image is of {} quality.",
        percent(verdict.confidence()),
        verdict.label().as_str()
    )
}

const fn no_issues_line(label: QualityLabel) -> &'static str {
    match label {
        QualityLabel::Good => "No specific technical issues (blur, darkness) were flagged.",
        QualityLabel::Bad => {
            "AI predicts low quality, but specific issues (blur/darkness) were not strongly detected by our checks."
        }
    }
}

/// Formats a `[0, 1]` confidence as a whole-number percentage.
fn percent(confidence: f32) -> String {
    format!("{:.0}", f64::from(confidence) * 100.0)
}

impl ResultOutput for TextReport {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, result: &AnalysisResult) -> Result<()> {
        let report = render(result);
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image_qa_core::Issue;

    use super::*;
    use crate::output::json::tests::{sample_result, SharedBuf};

    #[test]
    fn test_good_without_issues() {
        let report = render(&sample_result(0.87, vec![]));

        assert!(report.contains("Analysis Results: photo.jpg (640x480)"));
        assert!(report.contains("Result: Good Quality"));
        assert!(report.contains("The model is 87% confident this image is of good quality."));
        assert!(report.contains("No specific technical issues (blur, darkness) were flagged."));
        assert!(!report.contains(ISSUE_MARKER));
    }

    #[test]
    fn test_bad_without_issues() {
        let report = render(&sample_result(0.25, vec![]));

        assert!(report.contains("Result: Bad Quality"));
        assert!(report.contains("The model is 75% confident this image is of bad quality."));
        assert!(report.contains("AI predicts low quality, but specific issues"));
    }

    #[test]
    fn test_issues_listed_in_order() {
        let issues = vec![Issue::blur(4.5), Issue::darkness(10.0)];
        let report = render(&sample_result(0.1, issues));

        assert!(report.contains("Further analysis found these potential issues:"));
        let blur = report
            .find("⚠️ Potential Blur Detected (Variance: 4.50)")
            .unwrap();
        let dark = report
            .find("⚠️ Potential Darkness Detected (Brightness: 10.00)")
            .unwrap();
        assert!(blur < dark);
        assert!(!report.contains("AI predicts low quality"));
    }

    #[test]
    fn test_boundary_score_reports_bad_at_half() {
        let report = render(&sample_result(0.5, vec![]));
        assert!(report.contains("Result: Bad Quality"));
        assert!(report.contains("The model is 50% confident"));
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1.0), "100");
        assert_eq!(percent(0.5), "50");
        assert_eq!(percent(0.876), "88");
    }

    #[test]
    fn test_writer_receives_report() {
        let buf = SharedBuf::default();
        let output = TextReport::new(Box::new(buf.clone()));

        output.write(&sample_result(0.9, vec![])).unwrap();
        output.flush().unwrap();

        assert!(buf.contents().starts_with("Analysis Results:"));
    }
}
