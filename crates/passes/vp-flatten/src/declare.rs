//! Declaration sub-pass

use crate::{FlattenError, WireInfo, WireTable};
use log::{debug, trace, warn};
use vp_const_eval::ConstEvaluator;
use vp_stream::{CharStream, is_space, next_code_char, read_until, read_word, trim};

/// Keywords that open a storage declaration
const DECLARATION_KEYWORDS: [&str; 2] = ["reg", "wire"];

/// Replaces every multi-dimensional declaration with its flattened form
///
/// Each replaced declaration is recorded in `table`. Declarations with fewer
/// than two bracket groups are copied through as written.
///
/// # Errors
///
/// Returns `FlattenError` when a bound of a multi-dimensional declaration is
/// malformed, not constant, or negative.
pub fn flatten_declarations(source: &str, table: &mut WireTable) -> Result<String, FlattenError> {
    let evaluator = ConstEvaluator::new();
    let mut stream = CharStream::new(source);
    let mut out = String::with_capacity(source.len());
    let mut prev = ' ';
    let mut flattened = 0_usize;

    while let Some(ch) = next_code_char(&mut stream, prev, &mut out) {
        if matches!(ch, 'r' | 'w') && is_space(prev) {
            stream.push_back(ch);
            let start = stream.offset();
            let word = read_word(&mut stream);
            if DECLARATION_KEYWORDS.contains(&word.as_str()) {
                let decl = word + &read_until(&mut stream, ";", false);
                let parsed = WireInfo::parse(trim(&decl), &evaluator)
                    .map_err(|err| err.offset_by(start))?;
                if let Some(info) = parsed {
                    stream.eat(';');
                    out.push_str(&info.flattened_declaration());
                    trace!(
                        "flattened `{}` into {} declaration(s)",
                        info.name,
                        info.dimensions[1].indices().count()
                    );
                    flattened += 1;
                    let name = info.name.clone();
                    if !table.insert(info) {
                        warn!("`{name}` declared more than once; keeping the first shape");
                    }
                } else {
                    out.push_str(&decl);
                }
            } else {
                out.push_str(&word);
            }
        } else {
            out.push(ch);
        }
        prev = ch;
    }

    debug!(
        "declaration sub-pass: {flattened} declaration(s) flattened, {} name(s) registered",
        table.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    fn declare(source: &str) -> (String, WireTable) {
        let mut table = WireTable::new();
        let out = flatten_declarations(source, &mut table).unwrap();
        (out, table)
    }

    #[test]
    fn test_flattens_and_registers() {
        let (out, table) = declare("  reg [7:0] m [3:0];\n");
        assert_eq!(
            out,
            "  reg [7:0] m_0;\nreg [7:0] m_1;\nreg [7:0] m_2;\nreg [7:0] m_3;\n\n"
        );
        assert_eq!(
            table.get("m").map(|info| info.dimensions.clone()),
            Some(vec![Dimension::new(0, 7), Dimension::new(0, 3)])
        );
    }

    #[test]
    fn test_ascending_and_descending_bounds_agree() {
        let (ascending, _) = declare("wire [7:0] m [0:3];");
        let (descending, _) = declare("wire [7:0] m [3:0];");
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_other_declarations_are_untouched() {
        let source = "wire [WIDTH-1:0] a ;\nreg b, c;\nwire_t d;\nassign w = r;\n";
        let (out, table) = declare(source);
        assert_eq!(out, source);
        assert!(table.is_empty());
    }

    #[test]
    fn test_keyword_must_follow_whitespace() {
        let source = "(reg [1:0] m [1:0]);";
        assert_eq!(declare(source).0, source);
    }

    #[test]
    fn test_comment_is_untouched() {
        let source = "// reg [7:0] m [3:0];\n";
        let (out, table) = declare(source);
        assert_eq!(out, source);
        assert!(table.is_empty());
    }

    #[test]
    fn test_redeclaration_keeps_first_shape() {
        let (out, table) = declare("reg [1:0] m [1:0];\nreg [3:0] m [2:0];\n");
        assert_eq!(out.lines().filter(|line| line.contains("m_")).count(), 5);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("m").map(|info| info.dimensions[1].upper), Some(1));
    }

    #[test]
    fn test_bound_error_offset_is_in_input() {
        let mut table = WireTable::new();
        let err = flatten_declarations("x;\nreg [7:0] m [a:0];", &mut table).unwrap_err();
        assert!(matches!(err, FlattenError::Bound { offset: 16, .. }));
    }
}
