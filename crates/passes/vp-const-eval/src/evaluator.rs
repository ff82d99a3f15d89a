//! Operator-precedence expression evaluator

use crate::{BinaryOp, EvalError};
use vp_stream::{CharStream, read_until};

/// Characters that end an operand
const OPERAND_STOP: &str = "+-*/%() \t\n\r";

/// Const expression evaluator
///
/// Grammar:
///
/// ```text
/// expression ::= primary (op primary)*
/// primary    ::= '(' expression ')' | integer
/// ```
///
/// Binary operators are applied by precedence climbing; `* / %` bind tighter
/// than `+ -` and everything associates to the left.
#[derive(Debug, Clone)]
pub struct ConstEvaluator {
    /// Maximum parenthesis nesting
    max_depth: usize,
}

impl ConstEvaluator {
    /// Creates a new const evaluator
    #[must_use]
    pub fn new() -> Self {
        Self { max_depth: 128 }
    }

    /// Creates an evaluator that rejects parentheses nested deeper than `max_depth`
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Evaluates a complete expression held in a string
    ///
    /// # Errors
    ///
    /// See [`ConstEvaluator::eval_stream`].
    pub fn eval_str(&self, text: &str) -> Result<i64, EvalError> {
        self.eval_stream(&mut CharStream::new(text))
    }

    /// Evaluates the expression making up the rest of `stream`
    ///
    /// # Errors
    ///
    /// Returns `EvalError` if:
    /// - An operand is missing, is not a decimal literal, or is out of range
    /// - Parentheses do not balance
    /// - Characters remain after a complete expression
    /// - Division by zero or overflow occurs
    pub fn eval_stream(&self, stream: &mut CharStream) -> Result<i64, EvalError> {
        let mut parser = Parser {
            stream,
            depth: 0,
            max_depth: self.max_depth,
        };
        let value = parser.parse_expression()?;

        parser.stream.skip_whitespace();
        let offset = parser.stream.offset();
        match parser.stream.peek() {
            None => Ok(value),
            Some(')') => Err(EvalError::UnmatchedParen { offset }),
            Some(found) => Err(EvalError::UnexpectedChar { found, offset }),
        }
    }
}

impl Default for ConstEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates `text` with the default nesting limit
///
/// # Errors
///
/// See [`ConstEvaluator::eval_stream`].
pub fn eval(text: &str) -> Result<i64, EvalError> {
    ConstEvaluator::new().eval_str(text)
}

struct Parser<'stream> {
    stream: &'stream mut CharStream,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn parse_expression(&mut self) -> Result<i64, EvalError> {
        let lhs = self.parse_primary()?;
        self.parse_binary(lhs, 0)
    }

    /// Folds `lhs` with every following operator of at least `min_precedence`
    fn parse_binary(&mut self, mut lhs: i64, min_precedence: u8) -> Result<i64, EvalError> {
        while let Some(op) = self.peek_operator() {
            if op.precedence() < min_precedence {
                break;
            }
            let offset = self.stream.offset();
            self.stream.next();

            let mut rhs = self.parse_primary()?;
            while let Some(next) = self.peek_operator() {
                if next.precedence() <= op.precedence() {
                    break;
                }
                rhs = self.parse_binary(rhs, next.precedence())?;
            }

            lhs = apply(op, lhs, rhs, offset)?;
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<i64, EvalError> {
        self.stream.skip_whitespace();
        let offset = self.stream.offset();

        if self.stream.eat('(') {
            if self.depth >= self.max_depth {
                return Err(EvalError::NestingTooDeep {
                    limit: self.max_depth,
                    offset,
                });
            }
            self.depth += 1;
            let value = self.parse_expression()?;
            self.depth -= 1;

            self.stream.skip_whitespace();
            if !self.stream.eat(')') {
                return Err(EvalError::UnmatchedParen { offset });
            }
            return Ok(value);
        }

        let literal = read_until(self.stream, OPERAND_STOP, false);
        if literal.is_empty() {
            return Err(match self.stream.peek() {
                None => EvalError::UnexpectedEnd { offset },
                Some(found) => EvalError::UnexpectedChar { found, offset },
            });
        }
        parse_literal(literal, offset)
    }

    fn peek_operator(&mut self) -> Option<BinaryOp> {
        self.stream.skip_whitespace();
        self.stream.peek().and_then(BinaryOp::from_char)
    }
}

fn parse_literal(literal: String, offset: usize) -> Result<i64, EvalError> {
    if !literal.chars().all(|ch| ch.is_ascii_digit()) {
        let names_something = literal
            .chars()
            .next()
            .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '`');
        return Err(if names_something {
            EvalError::NonConstant { name: literal, offset }
        } else {
            EvalError::MalformedLiteral { literal, offset }
        });
    }
    literal
        .parse()
        .map_err(|_| EvalError::LiteralOutOfRange { literal, offset })
}

fn apply(op: BinaryOp, lhs: i64, rhs: i64, offset: usize) -> Result<i64, EvalError> {
    if op.is_division() && rhs == 0 {
        return Err(EvalError::DivisionByZero { offset });
    }
    op.checked_apply(lhs, rhs)
        .ok_or(EvalError::Overflow { offset })
}
