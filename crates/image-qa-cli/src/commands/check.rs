//! Check command - analyze one image's quality.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use image_qa_adapters::{models_dir, resolve_model_path, BytesImageSource, FsImageSource};
use image_qa_core::{
    select_device, AnalysisResult, AnalyzerConfig, BlurConfig, DarknessConfig, DevicePreference,
    ImageSource, QualityAnalyzer, QualityClassifier, QualityLabel, ResultOutput,
    DEFAULT_BLUR_VARIANCE_THRESHOLD, DEFAULT_DARKNESS_THRESHOLD, DEFAULT_GOOD_THRESHOLD,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::{is_brightness, is_probability, is_variance, AppConfig};
use crate::output::{JsonOutput, Spinner, TextReport};

/// Image argument that reads encoded bytes from stdin.
const STDIN_ARG: &str = "-";

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Single JSON object
    Json,
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse()
        .map_err(|_| format!("'{s}' is not a valid number"))
}

/// Parse and validate a decision threshold (0.0-1.0).
fn parse_probability(s: &str) -> Result<f32, String> {
    let value = parse_number(s)?;
    if is_probability(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a Laplacian variance threshold (>= 0).
fn parse_variance(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if is_variance(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not a non-negative number"))
    }
}

/// Parse and validate a brightness threshold (0-255).
fn parse_brightness(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if is_brightness(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=255"))
    }
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Image to analyze (JPEG or PNG), or `-` to read from stdin
    pub image: Option<PathBuf>,

    /// Classifier weights file (overrides config and models directory)
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Classifier scores above this are Good (0.0-1.0)
    #[arg(long, value_parser = parse_probability)]
    pub good_threshold: Option<f32>,

    /// Laplacian variance below which blur is flagged
    #[arg(long, value_parser = parse_variance)]
    pub blur_threshold: Option<f64>,

    /// Mean brightness (0-255) below which darkness is flagged
    #[arg(long, value_parser = parse_brightness)]
    pub darkness_threshold: Option<f64>,

    /// Run inference on the CPU even if an accelerator is available
    #[arg(long)]
    pub cpu: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Weights path from config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config_model: Option<PathBuf>,

    /// Device preference from config.
    #[arg(skip)]
    config_device: Option<DevicePreference>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Thresholds: CLI > config (accessor provides hardcoded fallback)
        args.good_threshold = args.good_threshold.or(config.classifier.good_threshold);
        args.blur_threshold = args.blur_threshold.or(config.blur.variance_threshold);
        args.darkness_threshold = args
            .darkness_threshold
            .or(config.darkness.brightness_threshold);

        // Output format: CLI > config
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }

        // Models: CLI > config
        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.models.dir);
        }
        args.config_model.clone_from(&config.models.path);
        args.config_device = config.classifier.device;

        args
    }

    /// Pipeline thresholds with fallback to hardcoded defaults.
    fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            good_threshold: self.good_threshold.unwrap_or(DEFAULT_GOOD_THRESHOLD),
            blur: BlurConfig {
                variance_threshold: self
                    .blur_threshold
                    .unwrap_or(DEFAULT_BLUR_VARIANCE_THRESHOLD),
            },
            darkness: DarknessConfig {
                brightness_threshold: self
                    .darkness_threshold
                    .unwrap_or(DEFAULT_DARKNESS_THRESHOLD),
            },
        }
    }

    /// Resolved weights path.
    fn model_path(&self) -> PathBuf {
        let dir = self.models_dir.clone().unwrap_or_else(models_dir);
        resolve_model_path(self.model.as_deref(), self.config_model.as_deref(), &dir)
    }

    fn device_preference(&self) -> DevicePreference {
        if self.cpu {
            DevicePreference::Cpu
        } else {
            self.config_device.unwrap_or_default()
        }
    }

    /// Get output format with fallback to text.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the check command.
pub struct CheckResult {
    /// Label assigned to the image.
    pub label: QualityLabel,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    let Some(image_arg) = args.image.as_deref() else {
        bail!("No image specified. Use --help for usage information.");
    };

    // Load the classifier before touching the image
    let model_path = args.model_path();
    let device = select_device(args.device_preference());
    let classifier = QualityClassifier::load(&model_path, &device).with_context(|| {
        format!(
            "Failed to load classifier from {}. Install weights with `image-qa models install <FILE>`",
            model_path.display()
        )
    })?;
    info!("Classifier ready ({})", model_path.display());

    let source = image_source(image_arg)?;
    debug!("Reading image from {}", source.describe());
    let image = source.load()?;

    let analyzer = QualityAnalyzer::new(classifier.into_handle(), device, args.analyzer_config());

    let spinner = Spinner::new(!args.quiet && std::io::stderr().is_terminal());
    let verdict = analyzer.analyze_with_progress(&image, &spinner)?;

    let result = AnalysisResult {
        source: image.source.clone(),
        timestamp: iso_timestamp(),
        dimensions: image.dimensions(),
        verdict,
    };

    let output: Box<dyn ResultOutput> = match args.format() {
        OutputFormat::Text => Box::new(TextReport::stdout()),
        OutputFormat::Json => Box::new(JsonOutput::stdout(args.pretty)),
    };
    output.write(&result)?;
    output.flush()?;

    let label = result.verdict.label();
    let exit_code = match label {
        QualityLabel::Good => ExitCode::Success,
        QualityLabel::Bad => ExitCode::Bad,
    };

    Ok(CheckResult { label, exit_code })
}

/// Picks the image source for the positional argument.
fn image_source(arg: &Path) -> Result<Box<dyn ImageSource>> {
    if arg.as_os_str() == STDIN_ARG {
        Ok(Box::new(BytesImageSource::from_stdin()?))
    } else {
        Ok(Box::new(FsImageSource::new(arg)))
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
