//! Macro expansion error types

use thiserror::Error;
use vp_stream::ScanError;

/// Error type for macro expansion
///
/// Every variant is fatal for the pass. Offsets are character positions in the
/// pass input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroError {
    /// Invocation of a name no earlier `` `define `` introduced
    #[error("macro `{name}` has not been defined")]
    UndefinedMacro {
        /// Macro name
        name: String,
        /// Location of the directive marker
        offset: usize,
    },

    /// Invocation whose argument count differs from the definition
    #[error("macro `{name}` takes {expected} argument(s) but {found} were given")]
    ArityMismatch {
        /// Macro name
        name: String,
        /// Number of declared parameters
        expected: usize,
        /// Number of arguments at the invocation
        found: usize,
        /// Location of the directive marker
        offset: usize,
    },

    /// Malformed parameter or argument list
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl MacroError {
    /// Character offset in the pass input where the error was detected
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UndefinedMacro { offset, .. } | Self::ArityMismatch { offset, .. } => *offset,
            Self::Scan(err) => err.offset(),
        }
    }
}
