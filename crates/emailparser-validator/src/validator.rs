//! Email field validator and per-record rule sets.

use emailparser::{Parser, ParserOptions};

use crate::error::{Errors, FieldError};
use crate::options::ValidatorOptions;

/// Validates one email field with a parser built once per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailValidator {
    parser: Parser,
    allow_nil: bool,
}

impl EmailValidator {
    /// Builds a validator from rule options over the default parser options.
    ///
    /// # Errors
    ///
    /// Returns [`emailparser::Error::Unsupported`] if the merged options
    /// request an unsupported parser feature.
    pub fn new(options: &ValidatorOptions) -> emailparser::Result<Self> {
        Self::with_defaults(ParserOptions::default(), options)
    }

    /// Builds a validator from rule options layered over shared `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`emailparser::Error::Unsupported`] if the merged options
    /// request an unsupported parser feature.
    pub fn with_defaults(
        defaults: ParserOptions,
        options: &ValidatorOptions,
    ) -> emailparser::Result<Self> {
        let merged = options.parser.apply(defaults);
        let parser = Parser::new(merged).inspect_err(|e| {
            tracing::warn!(error = %e, "Invalid email validator configuration");
        })?;
        tracing::debug!(options = ?merged, allow_nil = options.allow_nil, "Built email validator");
        Ok(Self {
            parser,
            allow_nil: options.allow_nil,
        })
    }

    /// Returns the parser this validator checks values with.
    #[must_use]
    pub const fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Checks a single value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Blank`] for a missing value (unless `allow_nil`)
    /// and [`FieldError::Invalid`] for a value that does not parse.
    pub fn validate(&self, value: Option<&str>) -> Result<(), FieldError> {
        match value {
            None if self.allow_nil => Ok(()),
            None => Err(FieldError::Blank),
            Some(v) if self.parser.is_valid(v) => Ok(()),
            Some(_) => Err(FieldError::Invalid),
        }
    }

    /// Checks `value` and records any failure under `field`.
    pub fn validate_each(&self, errors: &mut Errors, field: &str, value: Option<&str>) {
        if let Err(e) = self.validate(value) {
            tracing::trace!(field, error = %e, "Email field rejected");
            errors.add(field, e);
        }
    }
}

/// Reads a field value from a record.
pub type Accessor<T> = fn(&T) -> Option<&str>;

/// Decides whether a rule applies to a record.
pub type Condition<T> = fn(&T) -> bool;

struct Rule<T> {
    field: String,
    accessor: Accessor<T>,
    validator: EmailValidator,
    condition: Option<Condition<T>>,
}

/// Email rules for the fields of a record type.
///
/// ```
/// use emailparser_validator::{EmailRules, EmailValidator, ValidatorOptions};
///
/// struct Person {
///     email: Option<String>,
/// }
///
/// let rules = EmailRules::new().rule(
///     "email",
///     |p: &Person| p.email.as_deref(),
///     EmailValidator::new(&ValidatorOptions::new())?,
/// );
///
/// let person = Person { email: Some("invalid.@example.com".into()) };
/// assert_eq!(rules.validate(&person).messages("email"), vec!["is invalid"]);
/// # Ok::<(), emailparser::Error>(())
/// ```
pub struct EmailRules<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for EmailRules<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> std::fmt::Debug for EmailRules<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| &r.field))
            .finish()
    }
}

impl<T> EmailRules<T> {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule that always applies.
    #[must_use]
    pub fn rule(
        mut self,
        field: impl Into<String>,
        accessor: Accessor<T>,
        validator: EmailValidator,
    ) -> Self {
        self.rules.push(Rule {
            field: field.into(),
            accessor,
            validator,
            condition: None,
        });
        self
    }

    /// Adds a rule that applies only when `condition` holds for the record.
    #[must_use]
    pub fn rule_if(
        mut self,
        field: impl Into<String>,
        accessor: Accessor<T>,
        validator: EmailValidator,
        condition: Condition<T>,
    ) -> Self {
        self.rules.push(Rule {
            field: field.into(),
            accessor,
            validator,
            condition: Some(condition),
        });
        self
    }

    /// Runs every applicable rule and returns the collected errors.
    #[must_use]
    pub fn validate(&self, record: &T) -> Errors {
        let mut errors = Errors::new();
        for rule in &self.rules {
            if rule.condition.is_some_and(|applies| !applies(record)) {
                continue;
            }
            rule.validator
                .validate_each(&mut errors, &rule.field, (rule.accessor)(record));
        }
        errors
    }

    /// Returns true if no rule reports an error.
    #[must_use]
    pub fn is_valid(&self, record: &T) -> bool {
        self.validate(record).is_empty()
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
    use crate::options::ParserOverrides;

    #[test]
    fn test_blank_and_invalid() {
        let v = EmailValidator::new(&ValidatorOptions::new()).unwrap();
        assert_eq!(v.validate(Some("valid@example.com")), Ok(()));
        assert_eq!(
            v.validate(Some("invalid.@example.com")),
            Err(FieldError::Invalid)
        );
        assert_eq!(v.validate(None), Err(FieldError::Blank));
    }

    #[test]
    fn test_allow_nil() {
        let v = EmailValidator::new(&ValidatorOptions::new().allow_nil(true)).unwrap();
        assert_eq!(v.validate(None), Ok(()));
        assert_eq!(v.validate(Some("")), Err(FieldError::Invalid));
    }

    #[test]
    fn test_defaults_layered_under_rule_options() {
        let defaults = ParserOptions::new().with_local_end_with_dot(true);
        let v = EmailValidator::with_defaults(defaults, &ValidatorOptions::new()).unwrap();
        assert!(v.parser().options().allow_local_end_with_dot);
        assert_eq!(v.validate(Some("invalid.@example.com")), Ok(()));

        let strict = ValidatorOptions::new().parser(ParserOverrides {
            allow_local_end_with_dot: Some(false),
            ..ParserOverrides::default()
        });
        let v = EmailValidator::with_defaults(defaults, &strict).unwrap();
        assert_eq!(
            v.validate(Some("invalid.@example.com")),
            Err(FieldError::Invalid)
        );
    }

    #[test]
    fn test_unsupported_option_fails_at_setup() {
        let opts =
            ValidatorOptions::new().parser(ParserOptions::new().with_address_literal(true));
        let err = EmailValidator::new(&opts).unwrap_err();
        assert!(matches!(err, emailparser::Error::Unsupported(_)));
    }

    #[test]
    fn test_validate_each_records_field() {
        let v = EmailValidator::new(&ValidatorOptions::new()).unwrap();
        let mut errors = Errors::new();
        v.validate_each(&mut errors, "email", Some("a@b"));
        assert!(errors.is_empty());
        v.validate_each(&mut errors, "email", Some("()@b"));
        assert_eq!(errors.get("email"), vec![FieldError::Invalid]);
    }
}
