//! Core domain types for image quality analysis.

mod issue;
mod qa_module;
mod result;
mod verdict;

pub use issue::{Issue, IssueKind};
pub use qa_module::QaModule;
pub use result::{AnalysisResult, ImageDimensions, ImageInfo};
pub use verdict::{QualityLabel, Verdict};
