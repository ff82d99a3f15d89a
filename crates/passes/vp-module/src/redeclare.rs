//! Module redeclaration pass

use crate::{ModuleError, Port, PortRedeclaration};
use log::{debug, trace};
use vp_stream::{
    CharStream, ScanError, is_space, next_code_char, read_paren_list, read_until, read_word,
};

/// Keyword that opens a module header
const MODULE_KEYWORD: &str = "module";

/// Rewrites module headers according to a [`PortRedeclaration`] policy
#[derive(Debug, Clone, Default)]
pub struct ModuleRedeclarer {
    policy: PortRedeclaration,
    modules: usize,
}

impl ModuleRedeclarer {
    /// Create a redeclarer applying `policy` to every header
    #[must_use]
    pub const fn new(policy: PortRedeclaration) -> Self {
        Self { policy, modules: 0 }
    }

    /// Number of module headers rewritten so far
    #[must_use]
    pub const fn modules(&self) -> usize {
        self.modules
    }

    /// Rewrite every module header in `source`
    ///
    /// A header is only recognised when `module` starts a whitespace-delimited
    /// word. Everything outside headers is copied through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::PortList`] when a header has no `(` before its `;`
    /// or its port list never closes.
    pub fn redeclare_source(&mut self, source: &str) -> Result<String, ModuleError> {
        let mut stream = CharStream::new(source);
        let mut out = String::with_capacity(source.len());
        let mut prev = ' ';

        while let Some(ch) = next_code_char(&mut stream, prev, &mut out) {
            if ch == 'm' && is_space(prev) {
                stream.push_back(ch);
                let word = read_word(&mut stream);
                out.push_str(&word);
                if word == MODULE_KEYWORD {
                    self.rewrite_header(&mut stream, &mut out)?;
                }
            } else {
                out.push(ch);
            }
            prev = ch;
        }

        debug!(
            "module pass: {} header(s), policy {}",
            self.modules, self.policy
        );
        Ok(out)
    }

    /// Rewrite the header following the `module` keyword
    fn rewrite_header(
        &mut self,
        stream: &mut CharStream,
        out: &mut String,
    ) -> Result<(), ModuleError> {
        let name = read_until(stream, "(;", false);
        out.push_str(&name);

        let port_list = if stream.peek() == Some(';') {
            Err(ScanError::MissingOpenParen {
                found: Some(';'),
                offset: stream.offset(),
            })
        } else {
            read_paren_list(stream)
        };
        let ports: Vec<Port> = port_list
            .map_err(|source| ModuleError::PortList {
                module: name.trim().to_string(),
                source,
            })?
            .iter()
            .map(|descriptor| Port::parse(descriptor))
            .collect();

        let redeclare = self.policy.applies_to(&ports);
        let listed: Vec<&str> = ports
            .iter()
            .map(|port| {
                if redeclare && !port.kind.is_empty() {
                    port.name.as_str()
                } else {
                    port.descriptor.as_str()
                }
            })
            .collect();
        out.push('(');
        out.push_str(&listed.join(",\n"));
        out.push(')');

        out.push_str(&read_until(stream, ";", false));
        if stream.eat(';') {
            out.push(';');
        }

        let declarations: Vec<String> = if redeclare {
            ports
                .iter()
                .filter(|port| !port.kind.is_empty())
                .flat_map(Port::declarations)
                .collect()
        } else {
            Vec::new()
        };
        if !declarations.is_empty() || !matches!(stream.peek(), Some('\n' | '\r')) {
            out.push('\n');
        }
        for declaration in &declarations {
            out.push_str(declaration);
            out.push('\n');
        }

        trace!(
            "module `{}`: {} port(s), {} declaration(s)",
            name.trim(),
            ports.len(),
            declarations.len()
        );
        self.modules += 1;
        Ok(())
    }
}

/// Rewrite module headers in `source` under `policy`
///
/// # Errors
///
/// See [`ModuleRedeclarer::redeclare_source`].
pub fn redeclare_modules(source: &str, policy: PortRedeclaration) -> Result<String, ModuleError> {
    ModuleRedeclarer::new(policy).redeclare_source(source)
}
