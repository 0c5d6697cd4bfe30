//! Shared fixtures for CLI integration tests.
//!
//! Each test gets an isolated workspace: its own XDG config/data
//! directories, a deterministic classifier installed at the default
//! location, and generated images.

#![allow(dead_code, unused_imports, clippy::unwrap_used, clippy::expect_used, deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image_qa_core::ImageInfo;
use image_qa_test_support::model::write_constant_model;
use tempfile::TempDir;

pub use image_qa_test_support::model::{BAD_BIAS, GOOD_BIAS};

/// Isolated directory tree for one test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a workspace with no model installed.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::create_dir_all(dir.path().join("work")).unwrap();
        Self { dir }
    }

    /// Creates a workspace whose default model scores every image Good.
    pub fn good() -> Self {
        Self::with_model(GOOD_BIAS)
    }

    /// Creates a workspace whose default model scores every image Bad.
    pub fn bad() -> Self {
        Self::with_model(BAD_BIAS)
    }

    /// Creates a workspace with a constant-score model at the default path.
    pub fn with_model(head_bias: f32) -> Self {
        let ws = Self::empty();
        let models = ws.default_models_dir();
        std::fs::create_dir_all(&models).unwrap();
        write_constant_model(models.join("quality_net.safetensors"), head_bias).unwrap();
        ws
    }

    /// Root of the workspace.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Working directory the binary runs in.
    pub fn work_dir(&self) -> PathBuf {
        self.root().join("work")
    }

    /// Models directory the binary resolves by default.
    pub fn default_models_dir(&self) -> PathBuf {
        self.root().join("data").join("image-qa").join("models")
    }

    /// Writes a model with the given head bias to `name` under the root.
    pub fn write_model(&self, name: &str, head_bias: f32) -> PathBuf {
        let path = self.root().join(name);
        write_constant_model(&path, head_bias).unwrap();
        path
    }

    /// Saves a synthetic image; the format follows the extension.
    pub fn image(&self, name: &str, info: &ImageInfo) -> PathBuf {
        let path = self.root().join(name);
        info.image.save(&path).expect("fixture should encode");
        path
    }

    /// Writes the project config in the working directory.
    pub fn project_config(&self, toml: &str) {
        std::fs::write(self.work_dir().join(".image-qa.toml"), toml).unwrap();
    }

    /// Writes the user-level XDG config.
    pub fn xdg_config(&self, toml: &str) {
        let dir = self.root().join("config").join("image-qa");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), toml).unwrap();
    }

    /// The `image-qa` binary, isolated to this workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("image-qa").unwrap();
        cmd.current_dir(self.work_dir())
            .env("XDG_CONFIG_HOME", self.root().join("config"))
            .env("XDG_DATA_HOME", self.root().join("data"))
            .env_remove("RUST_LOG");
        cmd
    }
}
