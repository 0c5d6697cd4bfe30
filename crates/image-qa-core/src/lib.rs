//! Image QA Core - Domain logic and analysis pipeline
//!
//! This crate contains the core domain types, the classifier adapter, the
//! input preprocessor, and the blur/darkness heuristic checks.

pub mod compose;
pub mod domain;
pub mod inference;
pub mod modules;
pub mod pipeline;
pub mod ports;
pub mod preprocess;

pub use compose::{compose, DEFAULT_GOOD_THRESHOLD};
pub use domain::{
    AnalysisResult, ImageDimensions, ImageInfo, Issue, IssueKind, QaModule, QualityLabel, Verdict,
};
pub use inference::{
    select_device, DevicePreference, ModelError, QualityClassifier, QualityScorer, ScorerHandle,
};
pub use modules::{
    BlurConfig, DarknessConfig, HeuristicAnalyzer, DEFAULT_BLUR_VARIANCE_THRESHOLD,
    DEFAULT_DARKNESS_THRESHOLD,
};
pub use pipeline::{AnalyzerConfig, QualityAnalyzer};
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput, Stage};
pub use preprocess::{preprocess, INPUT_SHAPE, INPUT_SIZE};
