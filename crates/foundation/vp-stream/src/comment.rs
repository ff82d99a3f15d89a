//! Line comment detection
//!
//! Every pass decides whether it is inside a `//` comment by looking at the
//! character it just read together with the character it read before that.
//! Once a comment opens, the rest of the line is copied through untouched.

use crate::{CharStream, read_until};

/// Returns the rest of the line when `prev` and `current` open a line comment
///
/// The terminating newline stays in the stream. An empty remainder is reported
/// as `None`, in which case the caller treats `current` as ordinary text.
pub fn comment_rest(prev: char, current: char, stream: &mut CharStream) -> Option<String> {
    if prev != '/' || current != '/' {
        return None;
    }
    let rest = read_until(stream, "\n", false);
    (!rest.is_empty()).then_some(rest)
}

/// Reads the next character a pass should act on
///
/// When the character read completes a `//` marker, it and the remainder of the
/// line are appended to `out` verbatim and the line terminator that follows is
/// returned instead.
pub fn next_code_char(stream: &mut CharStream, prev: char, out: &mut String) -> Option<char> {
    let current = stream.next()?;
    match comment_rest(prev, current, stream) {
        Some(rest) => {
            out.push(current);
            out.push_str(&rest);
            stream.next()
        }
        None => Some(current),
    }
}
