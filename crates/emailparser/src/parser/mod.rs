//! Address grammar engine.
//!
//! Implements the `addr-spec` subset:
//!
//! ```text
//! mailbox       = local-part "@" domain
//! local-part    = quoted-string / dot-string
//! quoted-string = DQUOTE 1*(qtext / "\" escapable) DQUOTE
//! dot-string    = (atom / ".") *("." / atom)     ; dot placement per options
//! domain        = subdomain / "[" ... "]"        ; literal unsupported
//! subdomain     = label *("." label)
//! label         = ALPHA *(ALPHA / DIGIT) *("-" (ALPHA / DIGIT))
//! ```
//!
//! Every production returns `Result<Option<T>>`. `Ok(None)` means the
//! production did not match and the caller may try an alternative; `Err`
//! means input already committed to a production could not be completed and
//! the whole parse fails.

mod domain;
mod local;

use crate::cursor::Cursor;
use crate::error::{Error, Expected, Result};
use crate::options::ParserOptions;
use crate::tree::{Domain, Mailbox};

/// Address parser bound to a fixed set of [`ParserOptions`].
///
/// A parser holds no per-call state, so one instance can be shared across
/// threads and reused for any number of inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Creates a parser with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if `allow_address_literal` is set.
    pub fn new(options: ParserOptions) -> Result<Self> {
        if options.allow_address_literal {
            tracing::debug!(?options, "Rejected parser options");
            return Err(Error::Unsupported(
                "allow_address_literal: address literals are not supported yet",
            ));
        }
        Ok(Self { options })
    }

    /// Returns the options this parser was built with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a complete address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the input does not match the grammar or
    /// has trailing input after the domain.
    pub fn parse<'a>(&self, input: &'a str) -> Result<Mailbox<'a>> {
        let mut cursor = Cursor::new(input);
        let result = self.mailbox(&mut cursor);
        if let Err(e) = &result {
            tracing::trace!(input, error = %e, "Address rejected");
        }
        result
    }

    /// Returns true if [`parse`](Self::parse) would succeed.
    #[must_use]
    pub fn is_valid(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }

    fn mailbox<'a>(&self, c: &mut Cursor<'a>) -> Result<Mailbox<'a>> {
        let local_part = self
            .local_part(c)?
            .ok_or_else(|| Error::parse(c.position(), Expected::LocalPart))?;

        c.eat(b'@')
            .ok_or_else(|| Error::parse(c.position(), Expected::At))?;

        let domain = self
            .domain_or_address_literal(c)?
            .ok_or_else(|| Error::parse(c.position(), Expected::Domain))?;

        if !c.is_eof() {
            return Err(Error::parse(c.position(), Expected::EndOfInput));
        }

        Ok(Mailbox::new(local_part, domain))
    }

    fn domain_or_address_literal<'a>(&self, c: &mut Cursor<'a>) -> Result<Option<Domain<'a>>> {
        if c.eat(b'[').is_some() {
            if !self.options.allow_address_literal {
                return Err(Error::parse(c.position() - 1, Expected::AddressLiteral));
            }
            // No production for the literal body exists.
            return Err(Error::Unsupported("address literal domains"));
        }
        domain::domain(c)
    }
}

/// Parses `input` with a one-off parser.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] for unsupported options, or
/// [`Error::Parse`] if the input is not a valid address.
pub fn parse(input: &str, options: ParserOptions) -> Result<Mailbox<'_>> {
    Parser::new(options)?.parse(input)
}

/// Checks `input` with a one-off parser.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] for unsupported options. Parse failures are
/// reported as `Ok(false)`.
pub fn is_valid(input: &str, options: ParserOptions) -> Result<bool> {
    Ok(Parser::new(options)?.is_valid(input))
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
    use crate::tree::LocalPart;

    fn valid(input: &str) -> bool {
        Parser::default().is_valid(input)
    }

    fn valid_with(input: &str, options: ParserOptions) -> bool {
        Parser::new(options).unwrap().is_valid(input)
    }

    #[test]
    fn test_simple_address() {
        let mailbox = Parser::default().parse("a@b").unwrap();
        assert!(!mailbox.local_part().is_quoted());
        assert_eq!(mailbox.domain().labels(), &["b"]);
    }

    #[test]
    fn test_default_scenarios() {
        assert!(valid("a@b"));
        assert!(valid("a.b.c@b"));
        assert!(valid("abcABC012!#$%&'*+-/=?^_`{|}~@b"));
        assert!(!valid("()@b"));
        assert!(valid("\"()\"@b"));
        assert!(valid(r#""\a"@b"#));
        assert!(valid("a@b.c"));
        assert!(!valid("a@0b"));
        assert!(valid("a@b0"));
        assert!(!valid("a@b-"));
        assert!(!valid("a@b-.c"));
    }

    #[test]
    fn test_dot_flags() {
        assert!(!valid("a..b@b"));
        assert!(valid_with(
            "a..b@b",
            ParserOptions::new().with_dot_sequence_in_local(true)
        ));
        assert!(!valid(".a@b"));
        assert!(valid_with(
            ".a@b",
            ParserOptions::new().with_local_begin_with_dot(true)
        ));
        assert!(!valid("a.@b"));
        assert!(valid_with(
            "a.@b",
            ParserOptions::new().with_local_end_with_dot(true)
        ));
    }

    #[test]
    fn test_address_literal_rejected_at_construction() {
        let err = Parser::new(ParserOptions::new().with_address_literal(true)).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
        assert!(is_valid("a@b", ParserOptions::new().with_address_literal(true)).is_err());
    }

    #[test]
    fn test_address_literal_without_flag_is_parse_error() {
        let err = Parser::default().parse("a@[127.0.0.1]").unwrap_err();
        assert_eq!(err, Error::parse(2, Expected::AddressLiteral));
    }

    #[test]
    fn test_address_literal_branch_with_flag_is_unsupported() {
        let parser = Parser {
            options: ParserOptions::new().with_address_literal(true),
        };
        let err = parser.parse("a@[127.0.0.1]").unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
        assert!(!parser.is_valid("a@[127.0.0.1]"));
        assert!(parser.is_valid("a@b"));
    }

    #[test]
    fn test_missing_at() {
        let err = Parser::default().parse("ab").unwrap_err();
        assert_eq!(err, Error::parse(2, Expected::At));
    }

    #[test]
    fn test_missing_domain() {
        let err = Parser::default().parse("a@").unwrap_err();
        assert_eq!(err, Error::parse(2, Expected::Domain));
    }

    #[test]
    fn test_trailing_input() {
        let err = Parser::default().parse("a@b c").unwrap_err();
        assert_eq!(err, Error::parse(3, Expected::EndOfInput));
        assert!(!valid("a@b@c"));
    }

    #[test]
    fn test_empty_input() {
        let err = Parser::default().parse("").unwrap_err();
        assert_eq!(err, Error::parse(0, Expected::LocalPart));
    }

    #[test]
    fn test_quoted_local_part_tree() {
        let mailbox = Parser::default().parse(r#""john \"jd\" doe"@example.com"#).unwrap();
        match mailbox.local_part() {
            LocalPart::Quoted(q) => {
                assert_eq!(q.content(), r#"john \"jd\" doe"#);
                assert_eq!(q.unescaped(), r#"john "jd" doe"#);
            }
            LocalPart::Dotted(_) => panic!("Expected quoted local part"),
        }
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(!valid("jöhn@example.com"));
        assert!(!valid("john@exämple.com"));
        assert!(!valid("\"jö\"@example.com"));
    }

    #[test]
    fn test_free_functions() {
        assert!(parse("a@b", ParserOptions::default()).is_ok());
        assert!(is_valid("a@b", ParserOptions::default()).unwrap());
        assert!(!is_valid("a@", ParserOptions::default()).unwrap());
    }
}
