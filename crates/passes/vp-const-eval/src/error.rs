//! Const evaluation errors

use thiserror::Error;

/// Errors that can occur during const evaluation
///
/// Offsets are character positions inside the evaluated expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Input ended where an operand was required
    #[error("expected an operand, found end of expression")]
    UnexpectedEnd {
        /// Where the operand was expected
        offset: usize,
    },

    /// A character that cannot start an operand or continue the expression
    #[error("unexpected `{found}` in constant expression")]
    UnexpectedChar {
        /// The offending character
        found: char,
        /// Location of the character
        offset: usize,
    },

    /// Operand that is not a decimal integer literal
    #[error("malformed integer literal `{literal}`")]
    MalformedLiteral {
        /// Operand text
        literal: String,
        /// Location of the operand
        offset: usize,
    },

    /// Operand that names something; only literals are constant
    #[error("`{name}` is not a constant")]
    NonConstant {
        /// Operand text
        name: String,
        /// Location of the operand
        offset: usize,
    },

    /// Literal that does not fit the evaluation width
    #[error("integer literal `{literal}` is out of range")]
    LiteralOutOfRange {
        /// Operand text
        literal: String,
        /// Location of the operand
        offset: usize,
    },

    /// `(` without its `)`, or a stray `)`
    #[error("unmatched parenthesis")]
    UnmatchedParen {
        /// Location of the unmatched parenthesis
        offset: usize,
    },

    /// Division or modulo by zero
    #[error("division by zero")]
    DivisionByZero {
        /// Location of the operator
        offset: usize,
    },

    /// Integer overflow
    #[error("integer overflow in const evaluation")]
    Overflow {
        /// Location of the operator
        offset: usize,
    },

    /// Parentheses nested beyond the evaluator's limit
    #[error("parentheses nested deeper than {limit}")]
    NestingTooDeep {
        /// Configured limit
        limit: usize,
        /// Location of the parenthesis that crossed the limit
        offset: usize,
    },
}

impl EvalError {
    /// Returns the offset where the error occurred
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedEnd { offset }
            | Self::UnexpectedChar { offset, .. }
            | Self::MalformedLiteral { offset, .. }
            | Self::NonConstant { offset, .. }
            | Self::LiteralOutOfRange { offset, .. }
            | Self::UnmatchedParen { offset }
            | Self::DivisionByZero { offset }
            | Self::Overflow { offset }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }

    /// Returns true for errors that must abort preprocessing even where a
    /// caller would otherwise treat a failed evaluation as "not a constant"
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DivisionByZero { .. })
    }
}
