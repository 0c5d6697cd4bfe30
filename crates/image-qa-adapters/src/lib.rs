//! Image QA Adapters - External adapters for image-qa.
//!
//! This crate provides adapters for:
//! - Filesystem and in-memory (stdin) image sources
//! - Locating, verifying and installing the classifier weights

pub mod fs;
pub mod models;

pub use fs::{BytesImageSource, FsImageSource, STDIN_LABEL};
pub use models::{
    install_model, model_path_in, models_dir, resolve_model_path, sha256_file, verify_model,
    ModelReport, MODEL_FILENAME,
};
