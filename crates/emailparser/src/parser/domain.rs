//! Domain productions (RFC 1035 section 2.3.1 preferred name syntax).

use crate::charset::{is_letter, is_letter_or_digit};
use crate::cursor::Cursor;
use crate::error::{Error, Expected, Result};
use crate::tree::{Domain, Subdomain};

/// `domain = subdomain`.
pub(super) fn domain<'a>(c: &mut Cursor<'a>) -> Result<Option<Domain<'a>>> {
    Ok(subdomain(c)?.map(Domain::new))
}

/// `subdomain = label *("." label)`.
///
/// A label is mandatory after every dot regardless of options.
fn subdomain<'a>(c: &mut Cursor<'a>) -> Result<Option<Subdomain<'a>>> {
    let Some(first) = label(c) else {
        return Ok(None);
    };
    let mut sub = Subdomain::new(first);

    while c.eat(b'.').is_some() {
        let next = label(c).ok_or_else(|| Error::parse(c.position(), Expected::Label))?;
        sub.push(next);
    }

    Ok(Some(sub))
}

/// `label = ALPHA *(ALPHA / DIGIT) *("-" (ALPHA / DIGIT))`.
///
/// Each hyphen must be followed by exactly one letter or digit, so a label
/// can neither end with a hyphen nor continue past `-x` with more
/// alphanumerics.
fn label<'a>(c: &mut Cursor<'a>) -> Option<&'a str> {
    let start = c.position();
    c.eat_if(is_letter)?;
    c.eat_while(is_letter_or_digit);

    while c.peek() == Some(b'-') && c.peek_at(1).is_some_and(is_letter_or_digit) {
        c.skip(2);
    }

    Some(c.slice(start))
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

    fn scan_label(input: &str) -> (Option<&str>, usize) {
        let mut c = Cursor::new(input);
        let result = label(&mut c);
        (result, c.position())
    }

    #[test]
    fn test_label_must_start_with_letter() {
        assert_eq!(scan_label("b0"), (Some("b0"), 2));
        assert_eq!(scan_label("0b"), (None, 0));
        assert_eq!(scan_label("-b"), (None, 0));
    }

    #[test]
    fn test_label_stops_before_trailing_hyphen() {
        assert_eq!(scan_label("b-"), (Some("b"), 1));
        assert_eq!(scan_label("b--c"), (Some("b"), 1));
    }

    #[test]
    fn test_label_hyphen_units() {
        assert_eq!(scan_label("b-c-d"), (Some("b-c-d"), 5));
        assert_eq!(scan_label("ab1-2"), (Some("ab1-2"), 5));
        // Only one alphanumeric is taken after each hyphen.
        assert_eq!(scan_label("bb-cc"), (Some("bb-c"), 4));
    }

    #[test]
    fn test_subdomain_labels() {
        let mut c = Cursor::new("mail.example.com");
        let d = domain(&mut c).unwrap().unwrap();
        assert_eq!(d.labels(), &["mail", "example", "com"]);
        assert!(c.is_eof());
    }

    #[test]
    fn test_dangling_dot_is_fatal() {
        let mut c = Cursor::new("b.");
        assert_eq!(
            domain(&mut c).unwrap_err(),
            Error::parse(2, Expected::Label)
        );

        let mut c = Cursor::new("b..c");
        assert_eq!(
            domain(&mut c).unwrap_err(),
            Error::parse(2, Expected::Label)
        );
    }

    #[test]
    fn test_hyphen_before_dot() {
        let mut c = Cursor::new("b-.c");
        let d = domain(&mut c).unwrap().unwrap();
        assert_eq!(d.labels(), &["b"]);
        assert_eq!(c.peek(), Some(b'-'));
    }

    #[test]
    fn test_no_domain() {
        let mut c = Cursor::new("[1.2.3.4]");
        assert!(domain(&mut c).unwrap().is_none());
        assert_eq!(c.position(), 0);
    }
}
