//! A single `` `define `` and its substitution

use crate::MacroError;
use vp_stream::{CharStream, read_paren_list, read_until, trim};

/// A recorded macro definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDef {
    /// Macro name
    pub name: String,
    /// Whether the name was followed by a parameter list
    pub is_function_like: bool,
    /// Parameter names, trimmed, in declaration order
    pub params: Vec<String>,
    /// Replacement text with continuation lines joined and outer whitespace trimmed
    pub body: String,
}

impl MacroDef {
    /// Reads the remainder of a `` `define `` directive
    ///
    /// The stream must be positioned just after the `define` keyword. The
    /// directive runs to the first line terminator not preceded by a
    /// backslash; that terminator is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::Scan`] when a parameter list is left unterminated.
    pub fn parse(stream: &mut CharStream) -> Result<Self, MacroError> {
        let name = trim(&read_until(stream, "\n (", true)).to_string();

        while stream.eat(' ') {}
        let is_function_like = stream.peek() == Some('(');
        let params = if is_function_like {
            read_paren_list(stream)?
        } else {
            Vec::new()
        };

        Ok(Self {
            name,
            is_function_like,
            params,
            body: read_body(stream),
        })
    }

    /// Returns true for a definition with nothing to substitute
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Substitutes `args` into the body
    ///
    /// Parameters are replaced one after another, each over the output of the
    /// previous replacement, so an argument containing the name of a later
    /// parameter is itself substituted. The result is not rescanned for further
    /// invocations.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::ArityMismatch`] when the argument count differs from
    /// the parameter count. `offset` locates the invocation for the error.
    pub fn expand(&self, args: &[String], offset: usize) -> Result<String, MacroError> {
        if args.len() != self.params.len() {
            return Err(MacroError::ArityMismatch {
                name: self.name.clone(),
                expected: self.params.len(),
                found: args.len(),
                offset,
            });
        }

        let mut expanded = self.body.clone();
        for (param, arg) in self.params.iter().zip(args) {
            if param.is_empty() {
                continue;
            }
            let mut pos = 0;
            while let Some(found) = expanded[pos..].find(param.as_str()) {
                let start = pos + found;
                expanded.replace_range(start..start + param.len(), arg);
                pos = start + arg.len();
            }
        }
        Ok(expanded)
    }
}

/// Reads the body of a definition, joining backslash-continued lines
fn read_body(stream: &mut CharStream) -> String {
    let mut body = String::new();
    let mut continued = false;
    loop {
        body.push_str(&read_until(stream, "\\\n", false));
        match stream.next() {
            Some('\\') => {
                continued = true;
                continue;
            }
            Some('\r') => {
                stream.eat('\n');
            }
            _ => {}
        }
        body.push('\n');
        if !continued {
            break;
        }
        continued = false;
    }
    trim(&body).to_string()
}
