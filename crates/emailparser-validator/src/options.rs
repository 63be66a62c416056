//! Per-rule validator options.

use emailparser::ParserOptions;

/// Parser flags set on a single rule.
///
/// Unset flags fall back to the shared defaults the rule is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOverrides {
    /// Overrides `allow_address_literal`.
    pub allow_address_literal: Option<bool>,
    /// Overrides `allow_dot_sequence_in_local`.
    pub allow_dot_sequence_in_local: Option<bool>,
    /// Overrides `allow_local_begin_with_dot`.
    pub allow_local_begin_with_dot: Option<bool>,
    /// Overrides `allow_local_end_with_dot`.
    pub allow_local_end_with_dot: Option<bool>,
}

impl ParserOverrides {
    /// Merges these overrides over `defaults`.
    #[must_use]
    pub fn apply(&self, defaults: ParserOptions) -> ParserOptions {
        ParserOptions {
            allow_address_literal: self
                .allow_address_literal
                .unwrap_or(defaults.allow_address_literal),
            allow_dot_sequence_in_local: self
                .allow_dot_sequence_in_local
                .unwrap_or(defaults.allow_dot_sequence_in_local),
            allow_local_begin_with_dot: self
                .allow_local_begin_with_dot
                .unwrap_or(defaults.allow_local_begin_with_dot),
            allow_local_end_with_dot: self
                .allow_local_end_with_dot
                .unwrap_or(defaults.allow_local_end_with_dot),
        }
    }
}

impl From<ParserOptions> for ParserOverrides {
    fn from(options: ParserOptions) -> Self {
        Self {
            allow_address_literal: Some(options.allow_address_literal),
            allow_dot_sequence_in_local: Some(options.allow_dot_sequence_in_local),
            allow_local_begin_with_dot: Some(options.allow_local_begin_with_dot),
            allow_local_end_with_dot: Some(options.allow_local_end_with_dot),
        }
    }
}

/// Options of one email validation rule.
///
/// Keys other than `allow_nil` and the parser flags are ignored when
/// deserializing, so rule options can live next to unrelated settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidatorOptions {
    /// Treat a missing value as valid instead of blank.
    pub allow_nil: bool,
    /// Parser flags for this rule.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub parser: ParserOverrides,
}

impl ValidatorOptions {
    /// Creates options with nothing overridden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `allow_nil`.
    #[must_use]
    pub const fn allow_nil(mut self, allow: bool) -> Self {
        self.allow_nil = allow;
        self
    }

    /// Sets the parser overrides.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<ParserOverrides>) -> Self {
        self.parser = parser.into();
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
    fn test_empty_overrides_keep_defaults() {
        let defaults = ParserOptions::new().with_local_end_with_dot(true);
        assert_eq!(ParserOverrides::default().apply(defaults), defaults);
    }

    #[test]
    fn test_override_wins_over_default() {
        let defaults = ParserOptions::new().with_local_end_with_dot(true);
        let overrides = ParserOverrides {
            allow_local_end_with_dot: Some(false),
            allow_local_begin_with_dot: Some(true),
            ..ParserOverrides::default()
        };
        let merged = overrides.apply(defaults);
        assert!(!merged.allow_local_end_with_dot);
        assert!(merged.allow_local_begin_with_dot);
        assert!(!merged.allow_dot_sequence_in_local);
    }

    #[test]
    fn test_from_options_overrides_everything() {
        let rule = ParserOverrides::from(ParserOptions::new());
        let defaults = ParserOptions::new().with_dot_sequence_in_local(true);
        assert_eq!(rule.apply(defaults), ParserOptions::new());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_flat_options_ignoring_unknown() {
        let opts: ValidatorOptions = serde_json::from_str(
            r#"{"allow_nil": true, "allow_local_end_with_dot": true, "if": "sms_missing"}"#,
        )
        .unwrap();
        assert!(opts.allow_nil);
        assert_eq!(opts.parser.allow_local_end_with_dot, Some(true));
        assert_eq!(opts.parser.allow_local_begin_with_dot, None);
    }
}
