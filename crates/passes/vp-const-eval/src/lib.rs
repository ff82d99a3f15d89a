//! Compile-time constant evaluation
//!
//! Evaluates the integer arithmetic found inside bit ranges and array indices,
//! e.g. the `8*4-1` in `wire [8*4-1:0] bus`. Only literals, parentheses and the
//! binary operators `* / % + -` are understood; names are never resolved.
//!
//! Used for:
//! - Declaration bounds: `[hi:lo]` groups of multi-dimensional `reg`/`wire`
//! - Array indices: `name[expr]` references to flattened storage

mod error;
mod evaluator;
mod op;

pub use error::EvalError;
pub use evaluator::{ConstEvaluator, eval};
pub use op::BinaryOp;
