//! ML inference using Candle.
//!
//! Provides the classifier adapter contract, the `QualityNet` network,
//! safetensors loading and device selection.

mod classifier;
mod device;
mod error;
mod loader;
mod quality_net;

pub use classifier::{sigmoid, QualityClassifier, QualityScorer, ScorerHandle};
pub use device::{select_device, DevicePreference};
pub use error::ModelError;
pub use loader::load_safetensors;
pub use quality_net::QualityNet;
