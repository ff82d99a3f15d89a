//! Flattening error types

use thiserror::Error;
use vp_const_eval::EvalError;

/// Error type for both flattening sub-passes
///
/// Offsets are character positions in the input of the sub-pass that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// A bracket group of a multi-dimensional declaration has no `:`
    #[error("dimension `[{text}]` is not a `hi:lo` range")]
    MalformedDimension {
        /// Bracket contents
        text: String,
        /// Location of the bracket contents
        offset: usize,
    },

    /// A dimension bound evaluated below zero
    #[error("dimension bound evaluates to {value}, which is negative")]
    NegativeBound {
        /// Evaluated bound
        value: i64,
        /// Location of the bound expression
        offset: usize,
    },

    /// A dimension bound is not a constant expression
    #[error("cannot evaluate dimension bound")]
    Bound {
        /// Evaluator failure
        #[source]
        source: EvalError,
        /// Location of the failure
        offset: usize,
    },

    /// An index expression failed in a way that cannot be left in place
    #[error("cannot evaluate index of `{name}`")]
    Index {
        /// Flattened name being indexed
        name: String,
        /// Evaluator failure
        #[source]
        source: EvalError,
        /// Location of the failure
        offset: usize,
    },
}

impl FlattenError {
    /// Character offset in the sub-pass input where the error was detected
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::MalformedDimension { offset, .. }
            | Self::NegativeBound { offset, .. }
            | Self::Bound { offset, .. }
            | Self::Index { offset, .. } => *offset,
        }
    }

    /// Moves the offset from declaration-relative to input-relative
    #[must_use]
    pub(crate) fn offset_by(mut self, base: usize) -> Self {
        match &mut self {
            Self::MalformedDimension { offset, .. }
            | Self::NegativeBound { offset, .. }
            | Self::Bound { offset, .. }
            | Self::Index { offset, .. } => *offset += base,
        }
        self
    }
}
