//! Classifier adapter: the scoring contract and its candle implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use candle_core::{Device, Module, Tensor};
use candle_nn::VarBuilder;
use tracing::{debug, info};

use super::{load_safetensors, ModelError, QualityNet};
use crate::preprocess::INPUT_SHAPE;

/// A pre-trained scorer mapping a normalized image tensor to a quality score.
///
/// Implementations must be safe for concurrent read-only calls.
pub trait QualityScorer: Send + Sync {
    /// Scores a `(1, 224, 224, 3)` tensor, returning confidence in `[0, 1]`
    /// that the image is of good quality.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor has the wrong shape or inference fails.
    fn score(&self, input: &Tensor) -> Result<f32>;
}

/// Logistic function mapping a logit to `(0, 1)`.
#[inline]
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Shared, immutable handle to a loaded scorer.
pub type ScorerHandle = Arc<dyn QualityScorer>;

/// Candle-backed quality classifier.
///
/// Loaded once via [`QualityClassifier::load`]; never mutated afterwards.
pub struct QualityClassifier {
    net: QualityNet,
    device: Device,
}

impl QualityClassifier {
    /// Loads classifier weights from a safetensors artifact.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the file is missing, unreadable, not valid
    /// safetensors, or its tensors do not fit the network.
    pub fn load(path: impl AsRef<Path>, device: &Device) -> Result<Self, ModelError> {
        let path = path.as_ref();
        info!("Loading quality classifier from {}", path.display());

        let vb = load_safetensors(path, device)?;
        Self::from_var_builder(vb).map_err(|source| ModelError::Incompatible {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the classifier from already-loaded weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is missing or has the wrong shape.
    pub fn from_var_builder(vb: VarBuilder) -> candle_core::Result<Self> {
        let device = vb.device().clone();
        let net = QualityNet::new(vb)?;
        Ok(Self { net, device })
    }

    /// Wraps the classifier in a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> ScorerHandle {
        Arc::new(self)
    }
}

impl QualityScorer for QualityClassifier {
    fn score(&self, input: &Tensor) -> Result<f32> {
        ensure!(
            input.dims() == INPUT_SHAPE,
            "expected input shape {INPUT_SHAPE:?}, got {:?}",
            input.dims()
        );

        let input = input
            .to_device(&self.device)
            .context("Failed to move input to inference device")?;
        let logits = self.net.forward(&input).context("Inference failed")?;
        let logit = logits.squeeze(0)?.squeeze(0)?.to_scalar::<f32>()?;
        let score = sigmoid(logit);
        debug!(logit, score, "Classifier output");

        ensure!(score.is_finite(), "classifier produced non-finite score");
        Ok(score.clamp(0.0, 1.0))
    }
}
