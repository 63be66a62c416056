//! Parser configuration.

/// Flags that relax or extend the accepted grammar.
///
/// All flags default to `false`, which gives the strict RFC 5322 dot-atom
/// rules for the local part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserOptions {
    /// Accept `[...]` domains. Not supported yet; a parser cannot be built with it.
    pub allow_address_literal: bool,
    /// Accept two or more consecutive dots in an unquoted local part.
    pub allow_dot_sequence_in_local: bool,
    /// Accept an unquoted local part starting with a dot.
    pub allow_local_begin_with_dot: bool,
    /// Accept an unquoted local part ending with a dot.
    pub allow_local_end_with_dot: bool,
}

impl ParserOptions {
    /// Creates options with every flag disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_address_literal: false,
            allow_dot_sequence_in_local: false,
            allow_local_begin_with_dot: false,
            allow_local_end_with_dot: false,
        }
    }

    /// Sets `allow_address_literal`.
    #[must_use]
    pub const fn with_address_literal(mut self, allow: bool) -> Self {
        self.allow_address_literal = allow;
        self
    }

    /// Sets `allow_dot_sequence_in_local`.
    #[must_use]
    pub const fn with_dot_sequence_in_local(mut self, allow: bool) -> Self {
        self.allow_dot_sequence_in_local = allow;
        self
    }

    /// Sets `allow_local_begin_with_dot`.
    #[must_use]
    pub const fn with_local_begin_with_dot(mut self, allow: bool) -> Self {
        self.allow_local_begin_with_dot = allow;
        self
    }

    /// Sets `allow_local_end_with_dot`.
    #[must_use]
    pub const fn with_local_end_with_dot(mut self, allow: bool) -> Self {
        self.allow_local_end_with_dot = allow;
        self
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
    fn test_default_is_strict() {
        assert_eq!(ParserOptions::default(), ParserOptions::new());
        let opts = ParserOptions::default();
        assert!(!opts.allow_address_literal);
        assert!(!opts.allow_dot_sequence_in_local);
        assert!(!opts.allow_local_begin_with_dot);
        assert!(!opts.allow_local_end_with_dot);
    }

    #[test]
    fn test_builder_sets_single_flag() {
        let opts = ParserOptions::new().with_local_end_with_dot(true);
        assert!(opts.allow_local_end_with_dot);
        assert!(!opts.allow_local_begin_with_dot);
        assert!(!opts.allow_dot_sequence_in_local);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_missing_keys_default_false() {
        let opts: ParserOptions =
            serde_json::from_str(r#"{"allow_dot_sequence_in_local": true}"#).unwrap();
        assert_eq!(opts, ParserOptions::new().with_dot_sequence_in_local(true));
    }
}
