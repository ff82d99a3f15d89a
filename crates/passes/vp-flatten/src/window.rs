//! Bounded lookbehind buffer and suffix matching against flattened names

use std::collections::VecDeque;

/// Pending output characters, held back until no longer name can complete
///
/// The window keeps at most `capacity - 1` characters between pushes, so after
/// each push it holds the most recent `capacity` characters that have not yet
/// been written out.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    chars: VecDeque<char>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Window size that triggers draining
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pending characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true when nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Appends one character
    pub fn push(&mut self, ch: char) {
        self.chars.push_back(ch);
    }

    /// Appends a run of text
    pub fn push_str(&mut self, text: &str) {
        self.chars.extend(text.chars());
    }

    /// Returns true when the pending text ends with the whole of `name`
    #[must_use]
    pub fn ends_with(&self, name: &str) -> bool {
        let len = name.chars().count();
        len > 0
            && len <= self.chars.len()
            && self
                .chars
                .iter()
                .rev()
                .zip(name.chars().rev())
                .all(|(pending, expected)| *pending == expected)
    }

    /// Writes out characters from the front
    ///
    /// Without `force`, only enough characters to fall below capacity are
    /// written. With `force`, the window is emptied.
    pub fn drain_into(&mut self, out: &mut String, force: bool) {
        while self.chars.len() >= self.capacity || (force && !self.chars.is_empty()) {
            if let Some(ch) = self.chars.pop_front() {
                out.push(ch);
            }
        }
    }

    /// Writes out everything pending
    pub fn flush_into(&mut self, out: &mut String) {
        out.extend(self.chars.drain(..));
    }
}

/// Finds the registered name that the window currently ends with
#[derive(Debug, Clone)]
pub struct NameMatcher {
    /// Names ordered by length, shortest first, ties in registration order
    names: Vec<String>,
}

impl NameMatcher {
    /// Smallest window size the matcher works with
    pub const MIN_WINDOW: usize = 2;

    /// Create a matcher over `names`
    pub fn new<'names>(names: impl IntoIterator<Item = &'names str>) -> Self {
        let mut names: Vec<String> = names
            .into_iter()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        names.sort_by_key(|name| name.chars().count());
        Self { names }
    }

    /// Window capacity able to hold the longest name
    #[must_use]
    pub fn window_capacity(&self) -> usize {
        self.names
            .last()
            .map_or(0, |name| name.chars().count())
            .max(Self::MIN_WINDOW)
    }

    /// Longest registered name the window ends with
    #[must_use]
    pub fn longest_match(&self, window: &SlidingWindow) -> Option<&str> {
        self.names
            .iter()
            .rev()
            .find(|name| window.ends_with(name))
            .map(String::as_str)
    }
}
