//! Error types for address parsing.

use std::fmt;

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Grammar production that was required but could not be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Expected {
    /// Quoted string or dot-string before `@`.
    LocalPart,
    /// A single dot between atoms of the local part.
    SingleDot,
    /// The `@` separator.
    At,
    /// Domain after `@`.
    Domain,
    /// Label after a domain dot.
    Label,
    /// Bracketed address literal.
    AddressLiteral,
    /// End of input after the domain.
    EndOfInput,
}

impl Expected {
    /// Returns a short human-readable description.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::LocalPart => "local part",
            Self::SingleDot => "a single dot",
            Self::At => "'@'",
            Self::Domain => "domain",
            Self::Label => "domain label",
            Self::AddressLiteral => "domain name instead of address literal",
            Self::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Parser error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Requested feature has no grammar support.
    #[error("Unsupported feature: {0}")]
    Unsupported(&'static str),

    /// Input does not match the address grammar.
    #[error("Parse error at byte {position}: expected {expected}")]
    Parse {
        /// Byte position where the error occurred.
        position: usize,
        /// Production that failed to match.
        expected: Expected,
    },
}

impl Error {
    /// Creates a parse error at the given position.
    #[must_use]
    pub const fn parse(position: usize, expected: Expected) -> Self {
        Self::Parse { position, expected }
    }

    /// Returns true if this is a parse error (as opposed to a construction error).
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns the byte position of a parse error.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Parse { position, .. } => Some(*position),
            Self::Unsupported(_) => None,
        }
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
    fn test_parse_error_display() {
        let err = Error::parse(3, Expected::At);
        assert_eq!(err.to_string(), "Parse error at byte 3: expected '@'");
        assert!(err.is_parse());
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::Unsupported("address literal");
        assert_eq!(err.to_string(), "Unsupported feature: address literal");
        assert!(!err.is_parse());
        assert_eq!(err.position(), None);
    }
}
