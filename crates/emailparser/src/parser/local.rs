//! Local part productions.

use super::Parser;
use crate::charset::{is_atext, is_escapable, is_qtext};
use crate::cursor::Cursor;
use crate::error::{Error, Expected, Result};
use crate::tree::{DotString, LocalPart, LocalToken, QuotedString};

impl Parser {
    /// `local-part = quoted-string / dot-string`.
    pub(super) fn local_part<'a>(&self, c: &mut Cursor<'a>) -> Result<Option<LocalPart<'a>>> {
        if let Some(quoted) = quoted_string(c) {
            return Ok(Some(LocalPart::Quoted(quoted)));
        }
        Ok(self.dot_string(c)?.map(LocalPart::Dotted))
    }

    /// Atoms and dots, with dot placement governed by the parser options.
    ///
    /// A dot run longer than one fails immediately, while a trailing dot is
    /// only checked once no further token matches.
    fn dot_string<'a>(&self, c: &mut Cursor<'a>) -> Result<Option<DotString<'a>>> {
        let opts = &self.options;
        let mut tokens = Vec::new();

        if c.eat(b'.').is_some() {
            if !opts.allow_local_begin_with_dot {
                tracing::trace!(position = c.position(), "Local part begins with dot");
                return Ok(None);
            }
            tokens.push(LocalToken::Dot);
        } else if let Some(text) = atom(c) {
            tokens.push(LocalToken::Atom(text));
        } else {
            return Ok(None);
        }

        // The first token never counts towards a dot run.
        let mut dot_seq = 0usize;

        loop {
            if c.eat(b'.').is_some() {
                tokens.push(LocalToken::Dot);
                dot_seq += 1;
                if dot_seq > 1 && !opts.allow_dot_sequence_in_local {
                    return Err(Error::parse(c.position() - 1, Expected::SingleDot));
                }
            } else if let Some(text) = atom(c) {
                tokens.push(LocalToken::Atom(text));
                dot_seq = 0;
            } else {
                break;
            }
        }

        if dot_seq > 0 && !opts.allow_local_end_with_dot {
            tracing::trace!(position = c.position(), "Local part ends with dot");
            return Ok(None);
        }

        Ok(Some(DotString::new(tokens)))
    }
}

/// One or more `atext` characters.
fn atom<'a>(c: &mut Cursor<'a>) -> Option<&'a str> {
    c.eat_while(is_atext)
}

/// `DQUOTE 1*(qtext / "\" escapable) DQUOTE`.
///
/// Restores the cursor if any piece is missing.
fn quoted_string<'a>(c: &mut Cursor<'a>) -> Option<QuotedString<'a>> {
    let start = c.position();
    c.eat(b'"')?;

    let content_start = c.position();
    loop {
        match c.peek() {
            Some(b'\\') if c.peek_at(1).is_some_and(is_escapable) => c.skip(2),
            Some(b) if is_qtext(b) => c.skip(1),
            _ => break,
        }
    }
    let content = c.slice(content_start);

    if content.is_empty() || c.eat(b'"').is_none() {
        c.rewind(start);
        return None;
    }

    Some(QuotedString::new(content))
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
    use crate::options::ParserOptions;

    fn parser(options: ParserOptions) -> Parser {
        Parser::new(options).unwrap()
    }

    fn local<'a>(parser: &Parser, input: &'a str) -> (Result<Option<LocalPart<'a>>>, usize) {
        let mut c = Cursor::new(input);
        let result = parser.local_part(&mut c);
        (result, c.position())
    }

    #[test]
    fn test_atom_is_greedy() {
        let mut c = Cursor::new("ab+c.d");
        assert_eq!(atom(&mut c), Some("ab+c"));
        assert_eq!(c.peek(), Some(b'.'));
    }

    #[test]
    fn test_quoted_string_accepts_quote_only_symbols() {
        let mut c = Cursor::new("\"a b(c)@d\"@x");
        let q = quoted_string(&mut c).unwrap();
        assert_eq!(q.content(), "a b(c)@d");
        assert_eq!(c.peek(), Some(b'@'));
    }

    #[test]
    fn test_quoted_string_escapes() {
        let mut c = Cursor::new(r#""a\"b\\""#);
        assert_eq!(quoted_string(&mut c).unwrap().content(), r#"a\"b\\"#);
        assert!(c.is_eof());
    }

    #[test]
    fn test_quoted_string_rejects_bare_escape_symbols() {
        for input in [r#""a"b""#, r#""a\"#, "\"\"", "\"abc", "\"a\tb\""] {
            let mut c = Cursor::new(input);
            let result = quoted_string(&mut c);
            // `"a"b"` matches `"a"` and leaves the rest.
            if input == r#""a"b""# {
                assert_eq!(result.unwrap().content(), "a");
            } else {
                assert!(result.is_none(), "{input}");
                assert_eq!(c.position(), 0);
            }
        }
    }

    #[test]
    fn test_dot_string_tokens() {
        let p = Parser::default();
        let (result, pos) = local(&p, "a.b.c@x");
        let Some(LocalPart::Dotted(d)) = result.unwrap() else {
            panic!("Expected dot-string");
        };
        assert_eq!(d.atoms().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(d.tokens().len(), 5);
        assert_eq!(pos, 5);
    }

    #[test]
    fn test_consecutive_dots_fail_immediately() {
        let p = Parser::default();
        let (result, pos) = local(&p, "a..b@x");
        assert_eq!(result.unwrap_err(), Error::parse(2, Expected::SingleDot));
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_trailing_dot_is_no_match() {
        let p = Parser::default();
        let (result, _) = local(&p, "a.@x");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_leading_dot_is_no_match() {
        let p = Parser::default();
        let (result, _) = local(&p, ".a@x");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_leading_dot_not_counted_in_run() {
        let begin = parser(ParserOptions::new().with_local_begin_with_dot(true));
        assert!(local(&begin, "..a@x").0.unwrap().is_some());
        assert!(local(&begin, "...a@x").0.is_err());
    }

    #[test]
    fn test_lone_dot_with_begin_flag() {
        let begin = parser(ParserOptions::new().with_local_begin_with_dot(true));
        let (result, pos) = local(&begin, ".@x");
        assert!(result.unwrap().is_some());
        assert_eq!(pos, 1);
        assert!(local(&Parser::default(), ".@x").0.unwrap().is_none());
    }

    #[test]
    fn test_trailing_dot_sequence() {
        let p = parser(
            ParserOptions::new()
                .with_dot_sequence_in_local(true)
                .with_local_end_with_dot(true),
        );
        let (result, pos) = local(&p, "a...@x");
        assert!(result.unwrap().is_some());
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_quoted_preferred_over_dot_string() {
        let p = Parser::default();
        let (result, _) = local(&p, "\"a\"@x");
        assert!(result.unwrap().unwrap().is_quoted());
    }
}
