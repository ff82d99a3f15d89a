//! Two-dimensional wire flattening
//!
//! Runs in two sub-passes that share a [`WireTable`]:
//!
//! 1. [`flatten_declarations`] replaces each `reg`/`wire` declaration with two
//!    or more bracket groups by one declaration per index of its outer
//!    dimension, recording the shape in the table.
//! 2. [`rewrite_references`] rewrites constant-indexed uses of the recorded
//!    names, `name[expr]`, to the flattened `name_<value>`.

mod declare;
mod error;
mod rewrite;
mod table;
mod window;
mod wire;

pub use declare::flatten_declarations;
pub use error::FlattenError;
pub use rewrite::{ReferenceRewriter, rewrite_references};
pub use table::WireTable;
pub use window::{NameMatcher, SlidingWindow};
pub use wire::{Dimension, WireInfo};

/// Runs both sub-passes over `source` with a fresh table
///
/// # Errors
///
/// Returns `FlattenError` when a multi-dimensional declaration has a bound that
/// cannot be evaluated or when an index divides by zero.
pub fn flatten(source: &str) -> Result<String, FlattenError> {
    let mut table = WireTable::new();
    let declared = flatten_declarations(source, &mut table)?;
    rewrite_references(&declared, &table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_declaration_and_references() {
        let source = "reg [7:0] m [3:0];\nassign a = m[1+1];\nassign b = m[x];\n";
        assert_eq!(
            flatten(source).unwrap(),
            "reg [7:0] m_0;\nreg [7:0] m_1;\nreg [7:0] m_2;\nreg [7:0] m_3;\n\n\
             assign a = m_2;\nassign b = m[x];\n"
        );
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let source = "wire [3:0] bus [0:1];\nassign y = bus[1] | bus [0];\n";
        let once = flatten(source).unwrap();
        assert_eq!(flatten(&once).unwrap(), once);
    }
}
