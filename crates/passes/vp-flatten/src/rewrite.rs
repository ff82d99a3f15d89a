//! Reference sub-pass

use crate::{FlattenError, NameMatcher, SlidingWindow, WireTable};
use log::{debug, trace};
use vp_const_eval::ConstEvaluator;
use vp_stream::{CharStream, comment_rest, read_until};

/// Rewrites `name[expr]` to `name_<value>` for every flattened name
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    matcher: NameMatcher,
    evaluator: ConstEvaluator,
    rewrites: usize,
}

impl ReferenceRewriter {
    /// Create a rewriter for the names recorded in `table`
    #[must_use]
    pub fn new(table: &WireTable) -> Self {
        Self {
            matcher: NameMatcher::new(table.names()),
            evaluator: ConstEvaluator::new(),
            rewrites: 0,
        }
    }

    /// Number of references rewritten so far
    #[must_use]
    pub const fn rewrites(&self) -> usize {
        self.rewrites
    }

    /// Rewrite every constant-indexed reference in `source`
    ///
    /// A name followed by optional whitespace and a bracketed constant is
    /// replaced by `name_<value>` plus the skipped whitespace. Indices that are
    /// not constant, are negative, or never close are left as written, as is
    /// everything inside `//` comments.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::Index`] when an index divides by zero.
    pub fn rewrite_source(&mut self, source: &str) -> Result<String, FlattenError> {
        let mut stream = CharStream::new(source);
        let mut window = SlidingWindow::new(self.matcher.window_capacity());
        let mut out = String::with_capacity(source.len());
        let mut prev = '\0';

        while let Some(ch) = stream.next() {
            window.push(ch);
            let mut flush = false;
            let mut last_read = ch;

            if let Some(rest) = comment_rest(prev, ch, &mut stream) {
                window.push_str(&rest);
                flush = true;
            } else if let Some(name) = self.matcher.longest_match(&window).map(str::to_string) {
                if let Some(consumed) = self.rewrite_index(&name, &mut stream, &mut window)? {
                    last_read = consumed;
                    flush = true;
                }
            }

            window.drain_into(&mut out, flush);
            prev = last_read;
        }
        window.flush_into(&mut out);

        debug!("reference sub-pass: {} reference(s) rewritten", self.rewrites);
        Ok(out)
    }

    /// Handles the text after a matched name
    ///
    /// Returns the last character consumed when a bracket was taken from the
    /// stream, in which case the window holds either the rewritten suffix or
    /// the original text.
    fn rewrite_index(
        &mut self,
        name: &str,
        stream: &mut CharStream,
        window: &mut SlidingWindow,
    ) -> Result<Option<char>, FlattenError> {
        let whitespace = stream.skip_whitespace();
        if !stream.eat('[') {
            stream.push_back_str(&whitespace);
            return Ok(None);
        }

        let interior_start = stream.offset();
        let interior = read_until(stream, "]", false);
        if stream.peek() == Some(']') {
            match self.evaluator.eval_str(&interior) {
                Ok(value) if value >= 0 => {
                    stream.next();
                    window.push('_');
                    window.push_str(&value.to_string());
                    window.push_str(&whitespace);
                    trace!("rewrote `{name}[{interior}]` to `{name}_{value}`");
                    self.rewrites += 1;
                    return Ok(Some(']'));
                }
                Err(source) if source.is_fatal() => {
                    return Err(FlattenError::Index {
                        name: name.to_string(),
                        offset: interior_start + source.offset(),
                        source,
                    });
                }
                _ => {}
            }
        }

        window.push_str(&whitespace);
        window.push('[');
        window.push_str(&interior);
        Ok(Some(interior.chars().last().unwrap_or('[')))
    }
}

/// Rewrite references to the names recorded in `table`
///
/// An empty table leaves the text unchanged.
///
/// # Errors
///
/// See [`ReferenceRewriter::rewrite_source`].
pub fn rewrite_references(source: &str, table: &WireTable) -> Result<String, FlattenError> {
    if table.is_empty() {
        return Ok(source.to_string());
    }
    ReferenceRewriter::new(table).rewrite_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dimension, WireInfo};
    use vp_const_eval::EvalError;

    fn table(names: &[&str]) -> WireTable {
        let mut table = WireTable::new();
        for name in names {
            table.insert(WireInfo {
                name: (*name).to_string(),
                ty: "reg".to_string(),
                dimensions: vec![Dimension::new(7, 0), Dimension::new(3, 0)],
            });
        }
        table
    }

    fn rewrite(source: &str, names: &[&str]) -> String {
        rewrite_references(source, &table(names)).unwrap()
    }

    #[test]
    fn test_constant_index() {
        assert_eq!(rewrite("assign a = m[1+1];", &["m"]), "assign a = m_2;");
        assert_eq!(rewrite("m[0]", &["m"]), "m_0");
    }

    #[test]
    fn test_whitespace_before_bracket_moves_after_suffix() {
        assert_eq!(rewrite("x = m [3];", &["m"]), "x = m_3 ;");
    }

    #[test]
    fn test_non_constant_index_is_untouched() {
        assert_eq!(rewrite("assign b = m[x];", &["m"]), "assign b = m[x];");
        assert_eq!(rewrite("m [i+1] = 0;", &["m"]), "m [i+1] = 0;");
    }

    #[test]
    fn test_superstring_is_untouched() {
        assert_eq!(rewrite("mx[2]", &["m"]), "mx[2]");
        assert_eq!(rewrite("m_1[2]", &["m"]), "m_1[2]");
    }

    #[test]
    fn test_name_without_index_is_untouched() {
        assert_eq!(rewrite("assign m = m ;\n", &["m"]), "assign m = m ;\n");
    }

    #[test]
    fn test_longest_name_wins() {
        let names = ["mem", "em"];
        assert_eq!(rewrite("mem[1] em[2]", &names), "mem_1 em_2");
    }

    #[test]
    fn test_consecutive_references() {
        assert_eq!(rewrite("m[1]|m[2]", &["m"]), "m_1|m_2");
        assert_eq!(rewrite("data[0]+data[3]", &["data"]), "data_0+data_3");
    }

    #[test]
    fn test_comment_is_untouched() {
        let source = "// m[1]\nm[1] // m[2]\n";
        assert_eq!(rewrite(source, &["m"]), "// m[1]\nm_1 // m[2]\n");
    }

    #[test]
    fn test_unclosed_and_negative_index() {
        assert_eq!(rewrite("m[1", &["m"]), "m[1");
        assert_eq!(rewrite("m[0-1]", &["m"]), "m[0-1]");
    }

    #[test]
    fn test_empty_table_returns_input() {
        assert_eq!(rewrite("m[1]", &[]), "m[1]");
    }

    #[test]
    fn test_division_by_zero_is_fatal() {
        let err = rewrite_references("x m[4/0]", &table(&["m"])).unwrap_err();
        assert_eq!(
            err,
            FlattenError::Index {
                name: "m".to_string(),
                source: EvalError::DivisionByZero { offset: 1 },
                offset: 5,
            }
        );
    }

    #[test]
    fn test_counts_rewrites() {
        let mut rewriter = ReferenceRewriter::new(&table(&["m"]));
        rewriter.rewrite_source("m[0] m[1] m[x]").unwrap();
        assert_eq!(rewriter.rewrites(), 2);
    }
}
