//! Character-level scanning shared by every preprocessor pass
//!
//! The passes never tokenize their input. They walk it one character at a time
//! and fall back to a handful of primitives when they need to grab a run of
//! text: read up to a stop set, read a whitespace-delimited word, read a
//! parenthesized comma list, or skip a line comment.

mod comment;
mod error;
mod scan;
mod stream;

pub use comment::{comment_rest, next_code_char};
pub use error::ScanError;
pub use scan::{is_space, read_paren_list, read_until, read_word, split_and_trim, trim};
pub use stream::CharStream;
