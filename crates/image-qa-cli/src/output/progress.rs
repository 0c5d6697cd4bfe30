//! Spinner adapter using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use image_qa_core::{ProgressEvent, ProgressSink};

/// Spinner shown on stderr while an image is analyzed.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Creates a spinner; `enabled = false` makes every event a no-op.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
            {
                bar.set_style(style);
            }
            bar
        });

        Self { bar }
    }

    /// Creates a spinner that never draws.
    #[must_use]
    pub const fn hidden() -> Self {
        Self { bar: None }
    }
}

impl ProgressSink for Spinner {
    fn on_event(&self, event: ProgressEvent) {
        let Some(bar) = &self.bar else {
            return;
        };

        match event {
            ProgressEvent::Started { source } => {
                bar.set_message(format!("Analyzing {source}"));
                bar.enable_steady_tick(Duration::from_millis(100));
            }
            ProgressEvent::Stage { stage, .. } => {
                bar.set_message(format!("{}...", stage.describe()));
            }
            ProgressEvent::Completed { .. } => bar.finish_and_clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use image_qa_core::{compose, Stage};

    use super::*;

    #[test]
    fn test_hidden_spinner_ignores_events() {
        let spinner = Spinner::hidden();
        spinner.on_event(ProgressEvent::Started {
            source: "a.png".into(),
        });
        spinner.on_event(ProgressEvent::Stage {
            source: "a.png".into(),
            stage: Stage::Classifying,
        });
        spinner.on_event(ProgressEvent::Completed {
            source: "a.png".into(),
            verdict: compose(0.9, vec![], 0.5),
        });
        assert!(spinner.bar.is_none());
    }

    #[test]
    fn test_enabled_spinner_finishes() {
        let spinner = Spinner::new(true);
        spinner.on_event(ProgressEvent::Started {
            source: "a.png".into(),
        });
        spinner.on_event(ProgressEvent::Completed {
            source: "a.png".into(),
            verdict: compose(0.1, vec![], 0.5),
        });

        assert!(spinner.bar.as_ref().is_some_and(ProgressBar::is_finished));
    }
}
