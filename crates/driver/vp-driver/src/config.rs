//! Pipeline configuration loaded from `vlpp.toml`

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use vp_macro::DEFAULT_PASSTHROUGH;
use vp_module::PortRedeclaration;

/// File looked up in the working directory when no configuration is named
pub const CONFIG_FILE_NAME: &str = "vlpp.toml";

/// A pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Macro expansion
    Macros,
    /// Module header redeclaration
    Modules,
    /// Wire flattening and reference rewriting
    #[default]
    Flatten,
}

impl fmt::Display for Stage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Macros => "macros",
            Self::Modules => "modules",
            Self::Flatten => "flatten",
        };
        formatter.write_str(name)
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Stage selection
    pub pipeline: PipelineSection,
    /// Macro pass settings
    pub macros: MacroSection,
    /// Module pass settings
    pub modules: ModuleSection,
}

/// `[pipeline]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSection {
    /// Last stage to run
    pub stop_after: Stage,
}

/// `[macros]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacroSection {
    /// Directives copied through instead of being expanded
    pub passthrough: Vec<String>,
}

impl Default for MacroSection {
    fn default() -> Self {
        Self {
            passthrough: DEFAULT_PASSTHROUGH.iter().map(ToString::to_string).collect(),
        }
    }
}

/// `[modules]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleSection {
    /// Port redeclaration policy
    pub redeclare_ports: PortRedeclaration,
}

impl PipelineConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse pipeline configuration")
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load [`CONFIG_FILE_NAME`] from `dir` if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn find_in_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Ok(None);
        }
        Self::from_file(&config_path).map(Some)
    }
}
