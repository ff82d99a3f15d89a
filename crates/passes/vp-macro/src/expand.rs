//! Macro expansion pass

use crate::{MacroDef, MacroError, MacroTable};
use log::{debug, trace, warn};
use rustc_hash::FxHashSet;
use vp_stream::{CharStream, next_code_char, read_paren_list, read_until, trim};

/// Character that introduces a directive
pub const DIRECTIVE_MARKER: char = '`';

/// Directives copied to the output instead of being treated as invocations
pub const DEFAULT_PASSTHROUGH: [&str; 3] = ["ifdef", "else", "endif"];

/// Characters that end a directive name
const DIRECTIVE_STOP: &str = ":;-+/*%){}[] (\n";

/// Macro expansion context
///
/// Holds the macros defined so far. Definitions accumulate in stream order, so
/// a macro is only visible to text that follows its `` `define ``.
#[derive(Debug, Clone)]
pub struct MacroExpansionContext {
    table: MacroTable,
    passthrough: FxHashSet<String>,
    expansions: usize,
}

impl MacroExpansionContext {
    /// Create a context that passes through [`DEFAULT_PASSTHROUGH`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_passthrough(DEFAULT_PASSTHROUGH)
    }

    /// Create a context with a custom set of passthrough directives
    #[must_use]
    pub fn with_passthrough<I, S>(directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: MacroTable::new(),
            passthrough: directives.into_iter().map(Into::into).collect(),
            expansions: 0,
        }
    }

    /// Macros defined so far
    #[must_use]
    pub const fn table(&self) -> &MacroTable {
        &self.table
    }

    /// Number of invocations expanded so far
    #[must_use]
    pub const fn expansions(&self) -> usize {
        self.expansions
    }

    /// Expand every macro in `source`
    ///
    /// Definitions are removed from the output, except that a definition with
    /// an empty body is re-emitted as a bare `` `define NAME `` line. Text in
    /// `//` comments is never interpreted.
    ///
    /// # Errors
    ///
    /// Returns `MacroError` on an undefined macro, an arity mismatch, or an
    /// unterminated parameter or argument list.
    pub fn expand_source(&mut self, source: &str) -> Result<String, MacroError> {
        let mut stream = CharStream::new(source);
        let mut out = String::with_capacity(source.len());
        let mut prev = '\0';

        while let Some(ch) = next_code_char(&mut stream, prev, &mut out) {
            if ch == DIRECTIVE_MARKER {
                let offset = stream.offset().saturating_sub(1);
                self.expand_directive(&mut stream, offset, &mut out)?;
            } else {
                out.push(ch);
            }
            prev = ch;
        }

        debug!(
            "macro pass: {} definition(s), {} expansion(s)",
            self.table.len(),
            self.expansions
        );
        Ok(out)
    }

    /// Handle the directive following a marker at `offset`
    fn expand_directive(
        &mut self,
        stream: &mut CharStream,
        offset: usize,
        out: &mut String,
    ) -> Result<(), MacroError> {
        let directive = trim(&read_until(stream, DIRECTIVE_STOP, true)).to_string();

        if directive == "define" {
            let def = MacroDef::parse(stream)?;
            if def.is_empty() {
                out.push(DIRECTIVE_MARKER);
                out.push_str("define ");
                out.push_str(&def.name);
                out.push('\n');
            }
            trace!(
                "define `{}` with {} parameter(s)",
                def.name,
                def.params.len()
            );
            let name = def.name.clone();
            if !self.table.register(def) {
                warn!("macro `{name}` redefined; keeping the first definition");
            }
            return Ok(());
        }

        if self.passthrough.contains(&directive) {
            out.push(DIRECTIVE_MARKER);
            out.push_str(&directive);
            return Ok(());
        }

        let def = self
            .table
            .get(&directive)
            .ok_or_else(|| MacroError::UndefinedMacro {
                name: directive.clone(),
                offset,
            })?;
        let args = if stream.peek() == Some('(') {
            read_paren_list(stream)?
        } else {
            Vec::new()
        };
        out.push_str(&def.expand(&args, offset)?);
        self.expansions += 1;
        Ok(())
    }
}

impl Default for MacroExpansionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand macros in `source` with a fresh context and the default passthrough set
///
/// # Errors
///
/// See [`MacroExpansionContext::expand_source`].
pub fn expand_macros(source: &str) -> Result<String, MacroError> {
    MacroExpansionContext::new().expand_source(source)
}
