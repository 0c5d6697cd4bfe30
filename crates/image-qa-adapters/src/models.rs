//! Model artifact location, verification and installation.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image_qa_core::inference::{select_device, DevicePreference};
use image_qa_core::{ModelError, QualityClassifier};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Filename of the classifier weights inside the models directory.
pub const MODEL_FILENAME: &str = "quality_net.safetensors";

/// Returns the default models directory path.
///
/// Uses `XDG_DATA_HOME/image-qa/models` or `~/.local/share/image-qa/models`.
#[must_use]
pub fn models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("image-qa")
        .join("models")
}

/// Returns the weights path inside a models directory.
#[must_use]
pub fn model_path_in(dir: &Path) -> PathBuf {
    dir.join(MODEL_FILENAME)
}

/// Resolves the weights path: explicit path, then configured path, then
/// [`MODEL_FILENAME`] inside `models_dir`.
#[must_use]
pub fn resolve_model_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    models_dir: &Path,
) -> PathBuf {
    explicit
        .or(configured)
        .map_or_else(|| model_path_in(models_dir), Path::to_path_buf)
}

/// Computes the hex SHA-256 of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Result of checking a weights file.
#[derive(Debug, Clone)]
pub struct ModelReport {
    /// Path that was checked.
    pub path: PathBuf,
    /// Hex SHA-256 of the file.
    pub sha256: String,
    /// File size in bytes.
    pub size: u64,
}

/// Loads a weights file into the classifier and reports its digest.
///
/// # Errors
///
/// Returns an error if the file is missing or does not fit the network.
pub fn verify_model(path: &Path) -> Result<ModelReport> {
    check_loads(path)?;

    let size = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    let sha256 = sha256_file(path)?;
    debug!("Verified {} ({size} bytes, sha256 {sha256})", path.display());

    Ok(ModelReport {
        path: path.to_path_buf(),
        sha256,
        size,
    })
}

/// Validates a weights file and copies it into `models_dir`.
///
/// Returns the report for the installed copy.
///
/// # Errors
///
/// Returns an error if the source does not load as a classifier, or if the
/// models directory cannot be created or written.
pub fn install_model(source: &Path, models_dir: &Path) -> Result<ModelReport> {
    check_loads(source)?;

    fs::create_dir_all(models_dir).with_context(|| {
        format!(
            "Failed to create models directory {}",
            models_dir.display()
        )
    })?;

    let dest = model_path_in(models_dir);
    if is_same_file(source, &dest) {
        info!("Model already installed at {}", dest.display());
        return verify_model(&dest);
    }

    // Copy beside the destination, then swap it in
    let partial = dest.with_extension("safetensors.partial");
    if let Err(e) = fs::copy(source, &partial) {
        let _ = fs::remove_file(&partial);
        return Err(e).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                partial.display()
            )
        });
    }
    fs::rename(&partial, &dest).with_context(|| {
        format!(
            "Failed to move {} to {}",
            partial.display(),
            dest.display()
        )
    })?;
    info!("Installed model to {}", dest.display());

    verify_model(&dest)
}

/// True when both paths resolve to the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Loads the weights on CPU to prove they fit the network.
fn check_loads(path: &Path) -> Result<(), ModelError> {
    let device = select_device(DevicePreference::Cpu);
    QualityClassifier::load(path, &device).map(|_| ())
}
