//! Scanning cursor over a single input string.

/// Byte cursor owned by one parse call.
///
/// Every grammar terminal is ASCII, so any position the cursor stops at after
/// a successful match is a valid `str` boundary.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`.
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current byte position.
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if all input has been consumed.
    pub(crate) const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peeks at the byte at offset from the current position.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Peeks at the current byte without consuming it.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Consumes `byte` if it is next, returning the matched text.
    pub(crate) fn eat(&mut self, byte: u8) -> Option<&'a str> {
        if self.peek() == Some(byte) {
            let start = self.pos;
            self.pos += 1;
            Some(self.slice(start))
        } else {
            None
        }
    }

    /// Consumes one byte matching `pred`.
    pub(crate) fn eat_if(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a str> {
        match self.peek() {
            Some(b) if pred(b) => {
                let start = self.pos;
                self.pos += 1;
                Some(self.slice(start))
            }
            _ => None,
        }
    }

    /// Greedily consumes bytes matching `pred`; `None` if none matched.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.slice(start))
    }

    /// Advances by `n` bytes.
    pub(crate) fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Moves back to an earlier position.
    pub(crate) fn rewind(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
    }

    /// Returns the text from `start` to the current position.
    pub(crate) fn slice(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_does_not_advance_on_mismatch() {
        let mut c = Cursor::new("a@b");
        assert_eq!(c.eat(b'@'), None);
        assert_eq!(c.position(), 0);
        assert_eq!(c.eat(b'a'), Some("a"));
        assert_eq!(c.eat(b'@'), Some("@"));
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn test_eat_while_is_greedy() {
        let mut c = Cursor::new("abc1.x");
        assert_eq!(c.eat_while(|b| b.is_ascii_alphanumeric()), Some("abc1"));
        assert_eq!(c.eat_while(|b| b.is_ascii_alphanumeric()), None);
        assert_eq!(c.peek(), Some(b'.'));
    }

    #[test]
    fn test_eof_and_rewind() {
        let mut c = Cursor::new("ab");
        c.skip(5);
        assert!(c.is_eof());
        c.rewind(1);
        assert_eq!(c.peek(), Some(b'b'));
        assert_eq!(c.peek_at(1), None);
    }
}
