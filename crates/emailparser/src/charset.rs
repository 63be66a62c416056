//! Character classes of the address grammar.
//!
//! Membership is looked up in a 256-entry table computed at compile time, so
//! every parser shares the same read-only data.

/// RFC 5322 `atext` specials, legal in an unquoted local part.
pub const UNQUOTED_SYMBOLS: &[u8] = b"!#$%&'*+-/=?^_`{|}~";

/// Characters legal inside a quoted string but not outside it.
pub const QUOTED_ONLY_SYMBOLS: &[u8] = b"()<>[]:;@,. ";

/// Characters that must be backslash-escaped inside a quoted string.
pub const ESCAPE_SYMBOLS: &[u8] = b"\\\"";

const LETTER: u8 = 1;
const DIGIT: u8 = 1 << 1;
const UNQUOTED: u8 = 1 << 2;
const QUOTED_ONLY: u8 = 1 << 3;
const ESCAPE: u8 = 1 << 4;

const ATEXT: u8 = LETTER | DIGIT | UNQUOTED;
const QTEXT: u8 = ATEXT | QUOTED_ONLY;
const ESCAPABLE: u8 = QTEXT | ESCAPE;

static CLASSES: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];

    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] |= LETTER;
        table[b.to_ascii_uppercase() as usize] |= LETTER;
        b += 1;
    }

    let mut b = b'0';
    while b <= b'9' {
        table[b as usize] |= DIGIT;
        b += 1;
    }

    mark(&mut table, UNQUOTED_SYMBOLS, UNQUOTED);
    mark(&mut table, QUOTED_ONLY_SYMBOLS, QUOTED_ONLY);
    mark(&mut table, ESCAPE_SYMBOLS, ESCAPE);

    table
}

const fn mark(table: &mut [u8; 256], symbols: &[u8], class: u8) {
    let mut i = 0;
    while i < symbols.len() {
        table[symbols[i] as usize] |= class;
        i += 1;
    }
}

#[inline]
fn has(byte: u8, class: u8) -> bool {
    CLASSES[byte as usize] & class != 0
}

/// ASCII letter.
#[must_use]
pub fn is_letter(byte: u8) -> bool {
    has(byte, LETTER)
}

/// ASCII letter or digit.
#[must_use]
pub fn is_letter_or_digit(byte: u8) -> bool {
    has(byte, LETTER | DIGIT)
}

/// Character allowed in an atom (unquoted local-part run).
#[must_use]
pub fn is_atext(byte: u8) -> bool {
    has(byte, ATEXT)
}

/// Character allowed unescaped inside a quoted string.
#[must_use]
pub fn is_qtext(byte: u8) -> bool {
    has(byte, QTEXT)
}

/// Character allowed after a backslash inside a quoted string.
#[must_use]
pub fn is_escapable(byte: u8) -> bool {
    has(byte, ESCAPABLE)
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
    fn test_unquoted_symbol_count() {
        assert_eq!(UNQUOTED_SYMBOLS.len(), 19);
        assert_eq!((0..=255u8).filter(|b| is_atext(*b)).count(), 62 + 19);
    }

    #[test]
    fn test_letters_and_digits() {
        assert!(is_letter(b'a'));
        assert!(is_letter(b'Z'));
        assert!(!is_letter(b'0'));
        assert!(!is_letter(b'-'));
        assert!(is_letter_or_digit(b'7'));
        assert!(!is_letter_or_digit(b'_'));
    }

    #[test]
    fn test_atext_excludes_quoted_only() {
        for &b in QUOTED_ONLY_SYMBOLS {
            assert!(!is_atext(b), "{:?} must need quoting", b as char);
            assert!(is_qtext(b));
        }
    }

    #[test]
    fn test_escape_symbols_only_escapable() {
        for &b in ESCAPE_SYMBOLS {
            assert!(!is_qtext(b));
            assert!(is_escapable(b));
        }
    }

    #[test]
    fn test_control_and_non_ascii_rejected() {
        for b in [0u8, b'\t', b'\r', b'\n', 0x7f, 0x80, 0xff] {
            assert!(!is_escapable(b));
        }
    }
}
