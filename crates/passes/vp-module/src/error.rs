//! Module pass error types

use thiserror::Error;
use vp_stream::ScanError;

/// Error type for module header rewriting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    /// The port list after a module name could not be read
    #[error("malformed port list for module `{module}`")]
    PortList {
        /// Module name as written in the header
        module: String,
        /// Underlying list error
        #[source]
        source: ScanError,
    },
}

impl ModuleError {
    /// Character offset in the pass input where the error was detected
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::PortList { source, .. } => source.offset(),
        }
    }
}
