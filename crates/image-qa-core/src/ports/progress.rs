//! Progress reporting port for UI integration.

use crate::domain::Verdict;

/// Pipeline stage for an image in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Normalizing the image for the classifier.
    Preprocessing,
    /// Running classifier inference.
    Classifying,
    /// Running the heuristic checks.
    Inspecting,
}

impl Stage {
    /// Short description suitable for a spinner message.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Preprocessing => "Preparing image",
            Self::Classifying => "AI is analyzing the image",
            Self::Inspecting => "Checking for blur and darkness",
        }
    }
}

/// Events emitted during analysis.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started.
    Started {
        /// Image source label.
        source: String,
    },
    /// A pipeline stage began.
    Stage {
        /// Image source label.
        source: String,
        /// The stage that started.
        stage: Stage,
    },
    /// Analysis completed.
    Completed {
        /// Image source label.
        source: String,
        /// The resulting verdict.
        verdict: Verdict,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
