//! Mock implementations of core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use candle_core::Tensor;
use image_qa_core::domain::{AnalysisResult, ImageInfo};
use image_qa_core::inference::{QualityScorer, ScorerHandle};
use image_qa_core::ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};

/// Fake classifier returning a fixed score.
///
/// Counts calls so tests can assert the handle is reused.
pub struct FixedScorer {
    score: f32,
    calls: AtomicUsize,
}

impl FixedScorer {
    /// Creates a scorer that always returns `score`.
    #[must_use]
    pub const fn new(score: f32) -> Self {
        Self {
            score,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a shared handle to a scorer that always returns `score`.
    #[must_use]
    pub fn handle(score: f32) -> Arc<Self> {
        Arc::new(Self::new(score))
    }

    /// Returns the number of `score` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Converts a shared scorer into the core's handle type.
    #[must_use]
    pub fn as_handle(self: &Arc<Self>) -> ScorerHandle {
        Arc::clone(self) as ScorerHandle
    }
}

impl QualityScorer for FixedScorer {
    fn score(&self, _input: &Tensor) -> anyhow::Result<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }
}

/// Mock implementation of `ImageSource` for testing.
///
/// Yields a pre-built image, or an error when built with [`MockImageSource::failing`].
pub struct MockImageSource {
    image: Option<ImageInfo>,
    load_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source for the given image.
    #[must_use]
    pub fn new(image: ImageInfo) -> Self {
        Self {
            image: Some(image),
            load_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a source whose `load` always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            image: None,
            load_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns the number of times the source has been loaded.
    #[must_use]
    pub fn load_count(&self) -> usize {
        *self
            .load_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn load(&self) -> anyhow::Result<ImageInfo> {
        if let Ok(mut c) = self.load_count.lock() {
            *c += 1;
        }
        self.image
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock decode failure"))
    }

    fn describe(&self) -> String {
        self.image
            .as_ref()
            .map_or_else(|| "mock://failing".to_string(), |i| i.source.clone())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures results for later assertions.
pub struct MockResultOutput {
    results: Arc<Mutex<Vec<AnalysisResult>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured results.
    #[must_use]
    pub fn results(&self) -> Vec<AnalysisResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Stage` events.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Stage { .. }))
            .count()
    }

    /// Returns whether a `Completed` event was received.
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Completed { .. }))
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
