//! Compact convolutional quality classifier.
//!
//! Four stride-2 3x3 convolutions with ReLU shrink the 224x224 input to a
//! 14x14x128 feature map, global average pooling collapses it, and a single
//! linear unit produces the quality logit.

use std::collections::HashMap;

use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};

/// Channel progression through the convolution stack.
pub const CHANNELS: [usize; 5] = [3, 16, 32, 64, 128];

/// Convolution kernel size.
pub const KERNEL_SIZE: usize = 3;

/// Quality classifier network.
///
/// Input: `(batch, 224, 224, 3)` channel-last tensor scaled to `[0, 1]`.
/// Output: `(batch, 1)` logits; higher means better quality.
///
/// Weight names: `conv1` .. `conv4` and `head`, each with `weight` and `bias`.
pub struct QualityNet {
    convs: Vec<Conv2d>,
    head: Linear,
}

impl QualityNet {
    /// Creates the network from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is missing or has the wrong shape.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> candle_core::Result<Self> {
        let config = Conv2dConfig {
            padding: 1,
            stride: 2,
            ..Conv2dConfig::default()
        };

        let convs = CHANNELS
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                conv2d(
                    pair[0],
                    pair[1],
                    KERNEL_SIZE,
                    config,
                    vb.pp(format!("conv{}", i + 1)),
                )
            })
            .collect::<candle_core::Result<Vec<_>>>()?;

        let head = linear(CHANNELS[CHANNELS.len() - 1], 1, vb.pp("head"))?;

        Ok(Self { convs, head })
    }

    /// Weights with zero convolutions and a fixed head bias.
    ///
    /// Every input scores `sigmoid(head_bias)`. Used as a baseline artifact
    /// for wiring checks.
    ///
    /// # Errors
    ///
    /// Returns an error if tensor allocation fails.
    pub fn constant_weights(
        head_bias: f32,
        device: &Device,
    ) -> candle_core::Result<HashMap<String, Tensor>> {
        let mut map = HashMap::new();

        for (i, pair) in CHANNELS.windows(2).enumerate() {
            let name = format!("conv{}", i + 1);
            let weight = Tensor::zeros(
                (pair[1], pair[0], KERNEL_SIZE, KERNEL_SIZE),
                DType::F32,
                device,
            )?;
            map.insert(format!("{name}.weight"), weight);
            map.insert(
                format!("{name}.bias"),
                Tensor::zeros(pair[1], DType::F32, device)?,
            );
        }

        let last = CHANNELS[CHANNELS.len() - 1];
        map.insert(
            "head.weight".to_string(),
            Tensor::zeros((1, last), DType::F32, device)?,
        );
        map.insert("head.bias".to_string(), Tensor::new(&[head_bias], device)?);

        Ok(map)
    }
}

impl Module for QualityNet {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        // NHWC -> NCHW
        let mut x = x.permute((0, 3, 1, 2))?.contiguous()?;

        for conv in &self.convs {
            x = conv.forward(&x)?.relu()?;
        }

        // Global average pool over H and W
        let x = x.mean((2, 3))?;

        self.head.forward(&x)
    }
}
