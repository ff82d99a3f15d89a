//! Integration test utilities for the preprocessing pipeline
//!
//! A fixture is a directory under `fixtures/` holding `input.v`, the expected
//! `output.v`, and optionally a `vlpp.toml` that configures the run.

use anyhow::{Context, Result};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use vp_driver::{Pipeline, PipelineConfig, PipelineError};

/// Test fixture helper
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Fixture directory name
    pub name: String,
    /// Source text fed to the pipeline
    pub input: String,
    /// Configuration for the run
    pub config: PipelineConfig,
}

impl Fixture {
    /// Loads the fixture called `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the input or configuration cannot be read.
    pub fn load(name: &str) -> Result<Self> {
        let dir = fixtures_dir().join(name);
        let input = fs::read_to_string(dir.join("input.v"))
            .with_context(|| format!("Failed to read fixture input: {name}"))?;
        let config = PipelineConfig::find_in_dir(&dir)?.unwrap_or_default();
        Ok(Self {
            name: name.to_string(),
            input,
            config,
        })
    }

    /// Path of the expected output file
    #[must_use]
    pub fn expected_path(&self) -> PathBuf {
        fixtures_dir().join(&self.name).join("output.v")
    }

    /// Runs the pipeline over the fixture input
    ///
    /// # Errors
    ///
    /// Returns an error if any pass fails.
    pub fn run(&self) -> Result<String> {
        self.run_on(&self.input)
    }

    /// Runs the fixture's pipeline over other text, e.g. its own output
    ///
    /// # Errors
    ///
    /// Returns an error if any pass fails.
    pub fn run_on(&self, source: &str) -> Result<String> {
        Pipeline::new(self.config.clone())
            .with_source_name(&self.name)
            .run(source)
            .map(|output| output.text)
            .map_err(|err| anyhow::anyhow!(error_chain(&err)))
    }
}

/// Every fixture directory, sorted by name
///
/// # Errors
///
/// Returns an error if the fixtures directory cannot be listed.
pub fn all_fixtures() -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(fixtures_dir())? {
        let path = entry?.path();
        let name = path.file_name().and_then(|name| name.to_str());
        if let Some(name) = name.filter(|_| path.join("input.v").is_file()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Root of the fixture directories
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Error message followed by its source chain, on one line
#[must_use]
pub fn error_chain(err: &PipelineError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
