//! Run-of-text readers built on [`CharStream`]

use crate::{CharStream, ScanError};

/// Characters removed by [`trim`]
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r'];

/// Whitespace as understood by the C locale `isspace`
#[must_use]
pub fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Reads up to, but not including, the first character contained in `stop`
///
/// The stop character is left in the stream. When `stop` contains a newline a
/// carriage return also stops the read, and a carriage return directly after a
/// stopping newline is swallowed as part of the terminator. Running out of input
/// simply ends the read.
pub fn read_until(stream: &mut CharStream, stop: &str, skip_leading_whitespace: bool) -> String {
    let stops_at_newline = stop.contains('\n');
    if skip_leading_whitespace {
        stream.skip_whitespace();
    }

    let mut text = String::new();
    while let Some(ch) = stream.next() {
        if stop.contains(ch) || (stops_at_newline && ch == '\r') {
            if ch == '\n' && stream.peek() == Some('\r') {
                stream.next();
            }
            stream.push_back(ch);
            break;
        }
        text.push(ch);
    }
    text
}

/// Skips leading whitespace and reads one whitespace-delimited word
pub fn read_word(stream: &mut CharStream) -> String {
    stream.skip_whitespace();
    let mut word = String::new();
    while let Some(ch) = stream.peek() {
        if is_space(ch) {
            break;
        }
        word.push(ch);
        stream.next();
    }
    word
}

/// Strips spaces, tabs, newlines and carriage returns from both ends
#[must_use]
pub fn trim(text: &str) -> &str {
    text.trim_matches(TRIM_CHARS)
}

/// Splits on every `delimiter` and trims the pieces
///
/// There is no nesting awareness: a delimiter inside parentheses still splits.
/// A trailing delimiter does not produce an empty final piece.
#[must_use]
pub fn split_and_trim(text: &str, delimiter: char) -> Vec<String> {
    let mut pieces: Vec<&str> = text.split(delimiter).collect();
    if pieces.last().is_some_and(|last| last.is_empty()) {
        pieces.pop();
    }
    pieces.into_iter().map(|piece| trim(piece).to_string()).collect()
}

/// Reads a parenthesized, comma-separated list such as `(a, b, c)`
///
/// Leading whitespace before the `(` is skipped. The closing `)` is consumed.
///
/// # Errors
///
/// Returns [`ScanError::MissingOpenParen`] when the list does not start with `(`
/// and [`ScanError::UnterminatedList`] when input ends before the `)`.
pub fn read_paren_list(stream: &mut CharStream) -> Result<Vec<String>, ScanError> {
    stream.skip_whitespace();
    let offset = stream.offset();
    match stream.next() {
        Some('(') => {}
        found => return Err(ScanError::MissingOpenParen { found, offset }),
    }

    let contents = read_until(stream, ")", true);
    if !stream.eat(')') {
        return Err(ScanError::UnterminatedList { offset });
    }
    Ok(split_and_trim(&contents, ','))
}
