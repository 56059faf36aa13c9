//! Borrowed text cursor used by the codec and the line parser.
//!
//! A [`StringSegment`] is a view into a line. Every mutating operation narrows
//! the view in place; nothing is copied until [`StringSegment::to_string`] or
//! [`StringSegment::as_str`] is used by the caller.

use std::fmt;

/// Non-owning, shrinking view into a text buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringSegment<'a> {
    view: &'a str,
}

impl<'a> StringSegment<'a> {
    /// Create a segment covering all of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { view: text }
    }

    /// The current view.
    pub fn as_str(&self) -> &'a str {
        self.view
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Number of occurrences of `c` in the view.
    pub fn count_chars(&self, c: char) -> usize {
        self.view.matches(c).count()
    }

    /// First character, if any.
    pub fn first_char(&self) -> Option<char> {
        self.view.chars().next()
    }

    /// Last character, if any.
    pub fn last_char(&self) -> Option<char> {
        self.view.chars().next_back()
    }

    /// Remove and return the first character.
    pub fn read_left(&mut self) -> Option<char> {
        let c = self.first_char()?;
        self.view = &self.view[c.len_utf8()..];
        Some(c)
    }

    /// Remove and return the last character.
    pub fn read_right(&mut self) -> Option<char> {
        let c = self.last_char()?;
        self.view = &self.view[..self.view.len() - c.len_utf8()];
        Some(c)
    }

    /// Drop up to `count` leading characters.
    pub fn remove_prefix(&mut self, count: usize) {
        let cut = self
            .view
            .char_indices()
            .nth(count)
            .map_or(self.view.len(), |(idx, _)| idx);
        self.view = &self.view[cut..];
    }

    /// Drop up to `count` trailing characters.
    pub fn remove_suffix(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let cut = self
            .view
            .char_indices()
            .rev()
            .nth(count - 1)
            .map_or(0, |(idx, _)| idx);
        self.view = &self.view[..cut];
    }

    /// Trim whitespace (including `\r`) on both ends.
    pub fn trim(&mut self) {
        self.trim_left();
        self.trim_right();
    }

    /// Trim leading whitespace.
    pub fn trim_left(&mut self) {
        self.view = self.view.trim_start_matches(is_blank);
    }

    /// Trim trailing whitespace.
    pub fn trim_right(&mut self) {
        self.view = self.view.trim_end_matches(is_blank);
    }

    /// Compare with `pattern`, ASCII case-insensitive unless `case_sensitive`.
    pub fn matches(&self, pattern: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            self.view == pattern
        } else {
            self.view.eq_ignore_ascii_case(pattern)
        }
    }

    /// Split off the text before the first `delimiter`.
    ///
    /// Returns the prefix and leaves `self` positioned after the delimiter.
    /// Without a delimiter the whole view becomes the prefix and `self` is
    /// left empty. Returns `None` only when the view was already empty.
    pub fn split(&mut self, delimiter: char) -> Option<StringSegment<'a>> {
        if self.view.is_empty() {
            return None;
        }
        match self.view.split_once(delimiter) {
            Some((prefix, rest)) => {
                self.view = rest;
                Some(StringSegment::new(prefix))
            }
            None => {
                let prefix = StringSegment::new(self.view);
                self.view = "";
                Some(prefix)
            }
        }
    }
}

impl<'a> From<&'a str> for StringSegment<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for StringSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.view)
    }
}

fn is_blank(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\r' || c == '\u{b}'
}
