//! The per-image analysis pipeline.
//!
//! decode (adapter) -> preprocess -> score, and heuristics on the same image,
//! then compose. Stateless apart from the injected scorer handle.

use anyhow::{Context, Result};
use candle_core::Device;
use tracing::debug;

use crate::compose::{compose, DEFAULT_GOOD_THRESHOLD};
use crate::domain::{ImageInfo, Verdict};
use crate::inference::ScorerHandle;
use crate::modules::{BlurConfig, DarknessConfig, HeuristicAnalyzer};
use crate::ports::{ProgressEvent, ProgressSink, Stage};
use crate::preprocess::preprocess;

/// Thresholds used by the pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Scores strictly above this are labelled Good.
    pub good_threshold: f32,
    /// Blur check configuration.
    pub blur: BlurConfig,
    /// Darkness check configuration.
    pub darkness: DarknessConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            good_threshold: DEFAULT_GOOD_THRESHOLD,
            blur: BlurConfig::default(),
            darkness: DarknessConfig::default(),
        }
    }
}

/// Runs the classifier and heuristic checks on one image at a time.
pub struct QualityAnalyzer {
    scorer: ScorerHandle,
    device: Device,
    heuristics: HeuristicAnalyzer,
    good_threshold: f32,
}

impl QualityAnalyzer {
    /// Creates an analyzer around an already-loaded scorer.
    ///
    /// `device` is where input tensors are allocated; it should match the
    /// device the scorer was loaded on.
    #[must_use]
    pub fn new(scorer: ScorerHandle, device: Device, config: AnalyzerConfig) -> Self {
        Self {
            scorer,
            device,
            heuristics: HeuristicAnalyzer::new(config.blur, config.darkness),
            good_threshold: config.good_threshold,
        }
    }

    /// Analyzes a decoded image.
    ///
    /// # Errors
    ///
    /// Returns an error if tensor creation or inference fails.
    pub fn analyze(&self, image: &ImageInfo) -> Result<Verdict> {
        self.run(image, None)
    }

    /// Analyzes a decoded image, reporting each stage to `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error if tensor creation or inference fails.
    pub fn analyze_with_progress(
        &self,
        image: &ImageInfo,
        progress: &dyn ProgressSink,
    ) -> Result<Verdict> {
        self.run(image, Some(progress))
    }

    fn run(&self, image: &ImageInfo, progress: Option<&dyn ProgressSink>) -> Result<Verdict> {
        let emit = |event: ProgressEvent| {
            if let Some(sink) = progress {
                sink.on_event(event);
            }
        };
        let stage = |stage: Stage| {
            emit(ProgressEvent::Stage {
                source: image.source.clone(),
                stage,
            });
        };

        emit(ProgressEvent::Started {
            source: image.source.clone(),
        });
        debug!(
            "Analyzing {} ({}x{})",
            image.source, image.width, image.height
        );

        stage(Stage::Preprocessing);
        let tensor = preprocess(image, &self.device)?;

        stage(Stage::Classifying);
        let score = self
            .scorer
            .score(&tensor)
            .with_context(|| format!("Failed to score {}", image.source))?;

        stage(Stage::Inspecting);
        let issues = self.heuristics.analyze(image);
        debug!(score, issues = issues.len(), "Analysis complete");

        let verdict = compose(score, issues, self.good_threshold);
        emit(ProgressEvent::Completed {
            source: image.source.clone(),
            verdict: verdict.clone(),
        });

        Ok(verdict)
    }
}
