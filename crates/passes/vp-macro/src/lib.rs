//! Macro definition and expansion
//!
//! The first preprocessing pass. It walks the raw source once, front to back,
//! recording `` `define `` directives in a [`MacroTable`] and replacing every
//! `` `NAME `` or `` `NAME(args) `` invocation with the substituted body.
//! Conditional-compilation directives are copied through for the downstream
//! tool to interpret.

mod definition;
mod error;
mod expand;
mod table;

pub use definition::MacroDef;
pub use error::MacroError;
pub use expand::{DEFAULT_PASSTHROUGH, DIRECTIVE_MARKER, MacroExpansionContext, expand_macros};
pub use table::MacroTable;
