//! Shapes of multi-dimensional declarations

use crate::FlattenError;
use std::ops::RangeInclusive;
use vp_const_eval::ConstEvaluator;
use vp_stream::{is_space, trim};

/// A closed range of non-negative bounds with `lower <= upper`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    /// Smaller bound
    pub lower: u64,
    /// Larger bound
    pub upper: u64,
}

impl Dimension {
    /// Builds a dimension from bounds given in either order
    #[must_use]
    pub fn new(first: u64, second: u64) -> Self {
        Self {
            lower: first.min(second),
            upper: first.max(second),
        }
    }

    /// Every index covered by the range, ascending
    #[must_use]
    pub const fn indices(&self) -> RangeInclusive<u64> {
        self.lower..=self.upper
    }
}

/// Shape of a `reg`/`wire` declaration with at least two bracket groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireInfo {
    /// Declared identifier
    pub name: String,
    /// Leading keyword, up to the first space or bracket
    pub ty: String,
    /// Dimensions in source order; the first is the packed bit range
    pub dimensions: Vec<Dimension>,
}

impl WireInfo {
    /// Parses a trimmed declaration such as `reg [7:0] mem [0:3]`
    ///
    /// Returns `Ok(None)` for declarations this pass leaves alone: those with
    /// fewer than two bracket groups, no space or bracket after the keyword,
    /// or no identifier. Bounds are only evaluated once two groups are found.
    ///
    /// # Errors
    ///
    /// Returns `FlattenError` when a bracket group has no `:` or a bound is
    /// not a non-negative constant. Offsets are relative to `decl`.
    pub fn parse(decl: &str, evaluator: &ConstEvaluator) -> Result<Option<Self>, FlattenError> {
        let Some(end_of_type) = decl.find(|ch: char| is_space(ch) || ch == '[') else {
            return Ok(None);
        };
        let openings: Vec<usize> = decl.match_indices('[').map(|(at, _)| at).collect();
        if openings.len() < 2 {
            return Ok(None);
        }

        let mut dimensions = Vec::with_capacity(openings.len());
        for &open in &openings {
            let start = open + 1;
            let end = decl[start..].find(']').map_or(decl.len(), |close| start + close);
            let base = char_offset(decl, start);
            dimensions.push(parse_dimension(&decl[start..end], base, evaluator)?);
        }

        let name = declared_name(decl);
        if name.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            name: name.to_string(),
            ty: trim(&decl[..end_of_type]).to_string(),
            dimensions,
        }))
    }

    /// One declaration per index of the outer dimension, each ending in a newline
    ///
    /// Only the packed and the first outer dimension are used.
    #[must_use]
    pub fn flattened_declaration(&self) -> String {
        let [packed, outer, ..] = self.dimensions.as_slice() else {
            return String::new();
        };
        outer
            .indices()
            .map(|index| {
                format!(
                    "{} [{}:{}] {}_{index};\n",
                    self.ty, packed.upper, packed.lower, self.name
                )
            })
            .collect()
    }
}

/// Text between the first `]` and the next space or bracket after it
fn declared_name(decl: &str) -> &str {
    let Some(close) = decl.find(']') else {
        return "";
    };
    let after = close + 1;
    let search_from = after + decl[after..].chars().next().map_or(0, char::len_utf8);
    let end = decl[search_from..]
        .find(|ch: char| is_space(ch) || ch == '[')
        .map_or(decl.len(), |found| search_from + found);
    trim(&decl[after..end])
}

/// Evaluates `hi:lo` into a normalized dimension
fn parse_dimension(
    text: &str,
    base: usize,
    evaluator: &ConstEvaluator,
) -> Result<Dimension, FlattenError> {
    let Some(colon) = text.find(':') else {
        return Err(FlattenError::MalformedDimension {
            text: trim(text).to_string(),
            offset: base,
        });
    };
    let high = eval_bound(&text[..colon], base, evaluator)?;
    let low_base = base + char_offset(text, colon + 1);
    let low = eval_bound(&text[colon + 1..], low_base, evaluator)?;
    Ok(Dimension::new(high, low))
}

fn eval_bound(text: &str, base: usize, evaluator: &ConstEvaluator) -> Result<u64, FlattenError> {
    let value = evaluator
        .eval_str(text)
        .map_err(|source| FlattenError::Bound {
            offset: base + source.offset(),
            source,
        })?;
    u64::try_from(value).map_err(|_| FlattenError::NegativeBound {
        value,
        offset: base,
    })
}

/// Converts a byte index into `text` to a character count
fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vp_const_eval::EvalError;

    fn parse(decl: &str) -> Result<Option<WireInfo>, FlattenError> {
        WireInfo::parse(decl, &ConstEvaluator::new())
    }

    #[test]
    fn test_parse_two_dimensions() {
        let info = parse("reg [7:0] mem [0:3]").unwrap().unwrap();
        assert_eq!(info.name, "mem");
        assert_eq!(info.ty, "reg");
        assert_eq!(info.dimensions, [Dimension::new(0, 7), Dimension::new(0, 3)]);
    }

    #[test]
    fn test_bounds_are_normalized() {
        let ascending = parse("wire [0:7] m [0:3]").unwrap().unwrap();
        let descending = parse("wire [7:0] m [3:0]").unwrap().unwrap();
        assert_eq!(ascending.dimensions, descending.dimensions);
        assert_eq!(ascending.dimensions[1], Dimension { lower: 0, upper: 3 });
    }

    #[test]
    fn test_bounds_are_expressions() {
        let info = parse("reg [2*4-1:0] m [(1+1)*2-1 : 0]").unwrap().unwrap();
        assert_eq!(info.dimensions, [Dimension::new(7, 0), Dimension::new(3, 0)]);
    }

    #[test]
    fn test_name_without_spaces() {
        let info = parse("reg [7:0]m[1:0]").unwrap().unwrap();
        assert_eq!(info.name, "m");
    }

    #[test]
    fn test_third_dimension_is_recorded() {
        let info = parse("reg [7:0] cube [1:0] [3:0]").unwrap().unwrap();
        assert_eq!(info.dimensions.len(), 3);
        assert_eq!(info.flattened_declaration().lines().count(), 2);
    }

    #[test]
    fn test_fewer_than_two_groups_is_left_alone() {
        assert_eq!(parse("wire a").unwrap(), None);
        assert_eq!(parse("wire [7:0] a").unwrap(), None);
        assert_eq!(parse("wire [WIDTH-1:0] a").unwrap(), None);
        assert_eq!(parse("wire").unwrap(), None);
    }

    #[test]
    fn test_flattened_declaration() {
        let info = parse("reg [0:7] m [3:0]").unwrap().unwrap();
        assert_eq!(
            info.flattened_declaration(),
            "reg [7:0] m_0;\nreg [7:0] m_1;\nreg [7:0] m_2;\nreg [7:0] m_3;\n"
        );
    }

    #[test]
    fn test_malformed_dimension() {
        assert_eq!(
            parse("reg [7:0] m [4]").unwrap_err(),
            FlattenError::MalformedDimension {
                text: "4".to_string(),
                offset: 13,
            }
        );
    }

    #[test]
    fn test_negative_bound() {
        assert_eq!(
            parse("reg [7:0] m [0-1:0]").unwrap_err(),
            FlattenError::NegativeBound {
                value: -1,
                offset: 13,
            }
        );
    }

    #[test]
    fn test_non_constant_bound() {
        assert_eq!(
            parse("reg [W:0] m [1:0]").unwrap_err(),
            FlattenError::Bound {
                source: EvalError::NonConstant {
                    name: "W".to_string(),
                    offset: 0,
                },
                offset: 5,
            }
        );
    }
}
