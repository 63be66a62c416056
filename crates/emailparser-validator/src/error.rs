//! Field-level validation errors.

use std::fmt;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FieldError {
    /// Value is missing.
    #[error("can't be blank")]
    Blank,
    /// Value is not a valid email address.
    #[error("is invalid")]
    Invalid,
}

impl FieldError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Blank => "can't be blank",
            Self::Invalid => "is invalid",
        }
    }
}

/// Errors collected for a record, keyed by field name in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(String, FieldError)>,
}

impl Errors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`.
    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        self.entries.push((field.into(), error));
    }

    /// Returns the errors recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Vec<FieldError> {
        self.entries
            .iter()
            .filter(|(name, _)| name == field)
            .map(|(_, error)| *error)
            .collect()
    }

    /// Returns the messages recorded for `field`.
    #[must_use]
    pub fn messages(&self, field: &str) -> Vec<&'static str> {
        self.get(field).iter().map(FieldError::message).collect()
    }

    /// Returns messages prefixed with their field name, e.g. `email is invalid`.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(field, error)| format!("{field} {error}"))
            .collect()
    }

    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns an iterator over `(field, error)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldError)> {
        self.entries.iter().map(|(field, error)| (field.as_str(), *error))
    }

    /// Removes all errors.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl std::error::Error for Errors {}

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
    fn test_messages() {
        assert_eq!(FieldError::Blank.to_string(), "can't be blank");
        assert_eq!(FieldError::Invalid.message(), "is invalid");
    }

    #[test]
    fn test_errors_by_field() {
        let mut errors = Errors::new();
        assert!(errors.is_empty());

        errors.add("email", FieldError::Invalid);
        errors.add("backup_email", FieldError::Blank);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.messages("email"), vec!["is invalid"]);
        assert_eq!(errors.get("backup_email"), vec![FieldError::Blank]);
        assert!(errors.get("name").is_empty());
        assert_eq!(
            errors.to_string(),
            "email is invalid, backup_email can't be blank"
        );

        errors.clear();
        assert!(errors.is_empty());
    }
}
