//! Stage-tagged pipeline diagnostics

#![allow(unused_assignments, reason = "fields are read by the miette derive")]

use crate::Stage;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use vp_flatten::FlattenError;
use vp_macro::MacroError;
use vp_module::ModuleError;

/// A fatal pass error with the text the pass was reading
#[derive(Error, Debug, Diagnostic)]
pub enum PipelineError {
    /// Macro expansion failed
    #[error("macro expansion failed")]
    #[diagnostic(code(vlpp::macros))]
    Macro {
        /// Pass error
        #[source]
        error: MacroError,
        /// Text the pass was reading
        #[source_code]
        src: NamedSource<String>,
        /// Failing position
        #[label("{error}")]
        span: SourceSpan,
    },

    /// Module redeclaration failed
    #[error("module redeclaration failed")]
    #[diagnostic(
        code(vlpp::modules),
        help("every `module` header needs a parenthesized port list")
    )]
    Module {
        /// Pass error
        #[source]
        error: ModuleError,
        /// Text the pass was reading
        #[source_code]
        src: NamedSource<String>,
        /// Failing position
        #[label("{error}")]
        span: SourceSpan,
    },

    /// Wire flattening failed
    #[error("wire flattening failed")]
    #[diagnostic(code(vlpp::flatten))]
    Flatten {
        /// Pass error
        #[source]
        error: FlattenError,
        /// Text the pass was reading
        #[source_code]
        src: NamedSource<String>,
        /// Failing position
        #[label("{error}")]
        span: SourceSpan,
    },
}

impl PipelineError {
    /// Wrap a macro pass error
    #[must_use]
    pub fn macros(error: MacroError, name: &str, text: &str) -> Self {
        let span = span_at(text, error.offset());
        Self::Macro {
            error,
            src: NamedSource::new(name, text.to_string()),
            span,
        }
    }

    /// Wrap a module pass error
    #[must_use]
    pub fn modules(error: ModuleError, name: &str, text: &str) -> Self {
        let span = span_at(text, error.offset());
        Self::Module {
            error,
            src: NamedSource::new(name, text.to_string()),
            span,
        }
    }

    /// Wrap a flattening error
    #[must_use]
    pub fn flatten(error: FlattenError, name: &str, text: &str) -> Self {
        let span = span_at(text, error.offset());
        Self::Flatten {
            error,
            src: NamedSource::new(name, text.to_string()),
            span,
        }
    }

    /// Stage that failed
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Macro { .. } => Stage::Macros,
            Self::Module { .. } => Stage::Modules,
            Self::Flatten { .. } => Stage::Flatten,
        }
    }

    /// Byte span of the failure in the stage input
    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        match self {
            Self::Macro { span, .. } | Self::Module { span, .. } | Self::Flatten { span, .. } => {
                *span
            }
        }
    }
}

/// Converts a character offset into a one-character byte span
fn span_at(text: &str, char_offset: usize) -> SourceSpan {
    text.char_indices()
        .nth(char_offset)
        .map_or_else(
            || SourceSpan::from((text.len(), 0)),
            |(byte, ch)| SourceSpan::from((byte, ch.len_utf8())),
        )
}
