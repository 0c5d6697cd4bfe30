//! Test support utilities for image-qa.
//!
//! Provides mocks, a fake classifier, deterministic model weights, and
//! synthetic image builders for testing the analysis pipeline without a
//! trained model.
//!
//! # Example
//!
//! ```
//! use image_qa_test_support::{FixedScorer, SyntheticImageBuilder};
//!
//! let sharp = SyntheticImageBuilder::checkerboard(128, 128);
//! let blurry = SyntheticImageBuilder::uniform_gray(128, 128, 128);
//!
//! // Fake classifier that always answers 0.9
//! let scorer = FixedScorer::handle(0.9);
//! # let _ = (sharp, blurry, scorer);
//! ```

mod builders;
mod mocks;
pub mod model;

pub use builders::SyntheticImageBuilder;
pub use mocks::{FixedScorer, MockImageSource, MockProgressSink, MockResultOutput};
pub use model::write_constant_model;
