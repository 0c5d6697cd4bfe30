//! Configuration file support for image-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/image-qa/config.toml` (lowest priority)
//! - Project-local: `.image-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use image_qa_core::DevicePreference;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Project-local config filename.
const PROJECT_CONFIG: &str = ".image-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Classifier settings.
    pub classifier: ClassifierConfig,
    /// Blur check settings.
    pub blur: BlurConfig,
    /// Darkness check settings.
    pub darkness: DarknessConfig,
    /// Model settings.
    pub models: ModelsConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Classifier configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Scores strictly above this are Good (0.0-1.0).
    pub good_threshold: Option<f32>,
    /// Inference device: "auto" or "cpu".
    pub device: Option<DevicePreference>,
}

/// Blur check configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Laplacian variance below which an image is flagged.
    pub variance_threshold: Option<f64>,
}

/// Darkness check configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DarknessConfig {
    /// Mean brightness (0-255) below which an image is flagged.
    pub brightness_threshold: Option<f64>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
    /// Explicit weights file, overriding the models directory.
    pub path: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/image-qa/config.toml`
    /// 2. Project-local: `.image-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as
    /// warnings and dropped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Checks values against their valid ranges.
    ///
    /// Returns one message per invalid value.
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(t) = self
            .classifier
            .good_threshold
            .filter(|t| !is_probability(*t))
        {
            problems.push(format!(
                "classifier.good_threshold must be 0.0-1.0, got {t}"
            ));
        }
        if let Some(t) = self.blur.variance_threshold.filter(|t| !is_variance(*t)) {
            problems.push(format!(
                "blur.variance_threshold must be a non-negative number, got {t}"
            ));
        }
        if let Some(t) = self
            .darkness
            .brightness_threshold
            .filter(|t| !is_brightness(*t))
        {
            problems.push(format!(
                "darkness.brightness_threshold must be 0-255, got {t}"
            ));
        }
        if let Some(f) = self.output.format.as_deref().filter(|f| !is_format(f)) {
            problems.push(format!("output.format must be 'text' or 'json', got '{f}'"));
        }

        problems
    }

    /// Drops invalid values so the defaults apply instead.
    ///
    /// Returns the problems that were found.
    fn sanitize(&mut self) -> Vec<String> {
        let problems = self.validate();

        self.classifier.good_threshold = self
            .classifier
            .good_threshold
            .filter(|t| is_probability(*t));
        self.blur.variance_threshold = self.blur.variance_threshold.filter(|t| is_variance(*t));
        self.darkness.brightness_threshold = self
            .darkness
            .brightness_threshold
            .filter(|t| is_brightness(*t));
        self.output.format = self.output.format.take().filter(|f| is_format(f));

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Classifier
        self.classifier.good_threshold = other
            .classifier
            .good_threshold
            .or(self.classifier.good_threshold);
        self.classifier.device = other.classifier.device.or(self.classifier.device);

        // Heuristics
        self.blur.variance_threshold = other
            .blur
            .variance_threshold
            .or(self.blur.variance_threshold);
        self.darkness.brightness_threshold = other
            .darkness
            .brightness_threshold
            .or(self.darkness.brightness_threshold);

        // Models
        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
        self.models.path = other.models.path.or_else(|| self.models.path.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }
}

/// Valid decision threshold.
pub fn is_probability(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Valid Laplacian variance threshold.
pub fn is_variance(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Valid mean brightness threshold.
pub fn is_brightness(value: f64) -> bool {
    (0.0..=255.0).contains(&value)
}

/// Known output format name.
fn is_format(name: &str) -> bool {
    matches!(name, "text" | "json")
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("image-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.image-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.is_file())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
