//! Models command - manage the classifier weights.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use image_qa_adapters::{install_model, models_dir, resolve_model_path, verify_model, ModelReport};

use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// Print the resolved weights path
    Path,
    /// Load the weights and print their checksum
    Verify {
        /// Weights file (defaults to the resolved path)
        file: Option<PathBuf>,
    },
    /// Validate a weights file and copy it into the models directory
    Install {
        /// Weights file to install
        file: PathBuf,
    },
}

impl ModelsArgs {
    fn models_dir(&self, config: &AppConfig) -> PathBuf {
        self.models_dir
            .clone()
            .or_else(|| config.models.dir.clone())
            .unwrap_or_else(models_dir)
    }

    fn model_path(&self, config: &AppConfig) -> PathBuf {
        resolve_model_path(
            None,
            config.models.path.as_deref(),
            &self.models_dir(config),
        )
    }
}

/// Run the models command.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    match &args.command {
        ModelsCommand::Path => {
            println!("{}", args.model_path(config).display());
            Ok(())
        }
        ModelsCommand::Verify { file } => {
            let path = file.clone().unwrap_or_else(|| args.model_path(config));
            let report = verify_model(&path)?;
            print_report("OK", &report);
            Ok(())
        }
        ModelsCommand::Install { file } => {
            let report = install_model(file, &args.models_dir(config))?;
            print_report("Installed", &report);
            Ok(())
        }
    }
}

fn print_report(status: &str, report: &ModelReport) {
    println!("{status}: {}", report.path.display());
    println!("  size:   {} bytes", report.size);
    println!("  sha256: {}", report.sha256);
}
