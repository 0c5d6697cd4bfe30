//! CLI command definitions and handlers.

pub mod check;
pub mod models;

use clap::{Parser, Subcommand};

/// Image QA - AI-powered image quality analysis
#[derive(Parser)]
#[command(name = "image-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (image, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze an image's quality
    Check(check::CheckArgs),
    /// Manage the classifier weights
    Models(models::ModelsArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The image was classified Good (or a non-check command succeeded).
    Success = 0,
    /// The image was classified Bad.
    Bad = 1,
    /// Any failure, including a model that could not be loaded.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
