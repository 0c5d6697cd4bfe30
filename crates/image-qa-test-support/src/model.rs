//! Deterministic classifier weights for integration tests.

use std::path::Path;

use anyhow::{Context, Result};
use candle_core::Device;
use image_qa_core::inference::QualityNet;

/// Head bias that makes every image score about 0.88 (Good).
pub const GOOD_BIAS: f32 = 2.0;

/// Head bias that makes every image score about 0.12 (Bad).
pub const BAD_BIAS: f32 = -2.0;

/// Writes a constant-score model to `path` as safetensors.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_constant_model(path: impl AsRef<Path>, head_bias: f32) -> Result<()> {
    let path = path.as_ref();
    let weights = QualityNet::constant_weights(head_bias, &Device::Cpu)?;
    candle_core::safetensors::save(&weights, path)
        .with_context(|| format!("Failed to write model to {}", path.display()))
}
