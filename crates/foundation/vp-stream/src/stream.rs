//! In-memory character cursor with unbounded pushback

/// A cursor over a fully materialized character buffer.
///
/// Characters handed back through [`CharStream::push_back`] are returned by the
/// following reads in last-in first-out order, so callers may un-read as much
/// lookahead as they consumed.
#[derive(Debug, Clone)]
pub struct CharStream {
    chars: Vec<char>,
    pos: usize,
    pushed: Vec<char>,
}

impl CharStream {
    /// Creates a stream positioned at the first character of `text`
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            pushed: Vec::new(),
        }
    }

    /// Returns the next character without consuming it
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.pushed
            .last()
            .copied()
            .or_else(|| self.chars.get(self.pos).copied())
    }

    /// Hands a character back to the stream
    ///
    /// Un-reading the character that was just consumed only rewinds the cursor,
    /// which keeps [`CharStream::offset`] exact for the common case.
    pub fn push_back(&mut self, ch: char) {
        let rewinds = self.pushed.is_empty()
            && self
                .pos
                .checked_sub(1)
                .and_then(|prev| self.chars.get(prev))
                .is_some_and(|&prev_ch| prev_ch == ch);
        if rewinds {
            self.pos -= 1;
        } else {
            self.pushed.push(ch);
        }
    }

    /// Hands a run of text back so that it is read again in its original order
    pub fn push_back_str(&mut self, text: &str) {
        for ch in text.chars().rev() {
            self.push_back(ch);
        }
    }

    /// Consumes the next character if it equals `expected`
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes consecutive whitespace and returns it
    pub fn skip_whitespace(&mut self) -> String {
        let mut skipped = String::new();
        while let Some(ch) = self.peek() {
            if !crate::is_space(ch) {
                break;
            }
            skipped.push(ch);
            self.next();
        }
        skipped
    }

    /// Returns true once every character, including pushed-back ones, was read
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pushed.is_empty() && self.pos >= self.chars.len()
    }

    /// Character offset of the next read, relative to the start of the buffer
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos.saturating_sub(self.pushed.len())
    }
}

impl Iterator for CharStream {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if let Some(ch) = self.pushed.pop() {
            return Some(ch);
        }
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_rewinds_cursor() {
        let mut stream = CharStream::new("ab");
        assert_eq!(stream.next(), Some('a'));
        stream.push_back('a');
        assert_eq!(stream.offset(), 0);
        assert_eq!(stream.next(), Some('a'));
        assert_eq!(stream.next(), Some('b'));
        assert_eq!(stream.next(), None);
        assert!(stream.is_eof());
    }

    #[test]
    fn test_push_back_foreign_characters() {
        let mut stream = CharStream::new("xy");
        assert_eq!(stream.next(), Some('x'));
        stream.push_back_str("12");
        assert_eq!(stream.peek(), Some('1'));
        let rest: String = stream.by_ref().collect();
        assert_eq!(rest, "12y");
    }

    #[test]
    fn test_skip_whitespace_and_eat() {
        let mut stream = CharStream::new(" \t\n(rest");
        assert_eq!(stream.skip_whitespace(), " \t\n");
        assert!(!stream.eat(')'));
        assert!(stream.eat('('));
        assert_eq!(stream.peek(), Some('r'));
    }
}
