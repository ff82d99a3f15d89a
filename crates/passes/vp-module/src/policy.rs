//! When a port list is split into declarations

use crate::Port;
use serde::Deserialize;
use std::fmt;

/// Policy deciding whether a module's ports are redeclared after its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PortRedeclaration {
    /// Port lists are reformatted but left intact
    #[default]
    Never,
    /// Redeclare only when every port names a direction
    Auto,
    /// Redeclare every port that carries a type
    Always,
}

impl PortRedeclaration {
    /// Decides whether the ports of one module header are redeclared
    #[must_use]
    pub fn applies_to(self, ports: &[Port]) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Auto => !ports.is_empty() && ports.iter().all(Port::has_direction),
        }
    }
}

impl fmt::Display for PortRedeclaration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Never => "never",
            Self::Auto => "auto",
            Self::Always => "always",
        };
        formatter.write_str(name)
    }
}
