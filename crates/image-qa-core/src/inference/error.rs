//! Model loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure to load the classifier artifact.
///
/// Raised once at startup; there is no retry path.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact does not exist.
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The artifact exists but could not be read.
    #[error("failed to read model file {}", path.display())]
    Read {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not a valid safetensors file.
    #[error("failed to parse safetensors {}", path.display())]
    Parse {
        /// Artifact path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: safetensors::SafeTensorError,
    },

    /// A tensor uses a dtype the inference backend cannot hold.
    #[error("unsupported dtype {dtype} for tensor '{name}'")]
    UnsupportedDtype {
        /// Tensor name.
        name: String,
        /// Dtype as reported by safetensors.
        dtype: String,
    },

    /// The weights are missing or have the wrong shape for the network.
    #[error("model weights in {} are incompatible with the classifier", path.display())]
    Incompatible {
        /// Artifact path.
        path: PathBuf,
        /// Underlying tensor error.
        #[source]
        source: candle_core::Error,
    },
}
