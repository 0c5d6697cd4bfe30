//! Model loading utilities for safetensors format.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use tracing::debug;

use super::ModelError;

/// Loads a safetensors file and creates a `VarBuilder` for the model.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The safetensors data is invalid
/// - A tensor has an unsupported dtype or cannot be materialized
pub fn load_safetensors(
    path: impl AsRef<Path>,
    device: &Device,
) -> Result<VarBuilder<'static>, ModelError> {
    let path = path.as_ref();
    debug!("Loading safetensors from {}", path.display());

    if !path.is_file() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let data = std::fs::read(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tensors = SafeTensors::deserialize(&data).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();

    for name in tensors.names() {
        let tensor_view = tensors.tensor(name).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let dtype = safetensors_dtype_to_candle(name, tensor_view.dtype())?;
        let shape: Vec<usize> = tensor_view.shape().to_vec();

        let tensor = Tensor::from_raw_buffer(tensor_view.data(), dtype, &shape, device)
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(|source| ModelError::Incompatible {
                path: path.to_path_buf(),
                source,
            })?;

        tensor_map.insert(name.clone(), tensor);
    }

    debug!("Loaded {} tensors", tensor_map.len());
    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

/// Converts safetensors dtype to candle dtype.
fn safetensors_dtype_to_candle(name: &str, dtype: safetensors::Dtype) -> Result<DType, ModelError> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        other => Err(ModelError::UnsupportedDtype {
            name: name.to_string(),
            dtype: format!("{other:?}"),
        }),
    }
}
