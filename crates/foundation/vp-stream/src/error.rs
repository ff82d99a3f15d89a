//! Scanning errors

use thiserror::Error;

/// Errors raised while reading structured runs of text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A parenthesized list was expected but something else was found
    #[error("expected `(` to open a list, found {}", describe(.found))]
    MissingOpenParen {
        /// The character found instead, `None` at end of input
        found: Option<char>,
        /// Offset of the offending character
        offset: usize,
    },

    /// Input ended before the list was closed
    #[error("list is never closed with `)`")]
    UnterminatedList {
        /// Offset of the list start
        offset: usize,
    },
}

impl ScanError {
    /// Character offset in the scanned text where the error was detected
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::MissingOpenParen { offset, .. } | Self::UnterminatedList { offset } => *offset,
        }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("`{}`", ch.escape_default()),
        None => "end of input".to_string(),
    }
}
