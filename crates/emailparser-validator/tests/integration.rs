//! Integration tests for record validation.
//!
//! Each test declares email rules for a small `Person` record and checks the
//! errors produced as the record's fields change.

#![allow(clippy::unwrap_used)]

use emailparser::ParserOptions;
use emailparser_validator::{
    EmailRules, EmailValidator, FieldError, ParserOverrides, ValidatorOptions,
};

#[derive(Debug, Default)]
struct Person {
    email: Option<String>,
    sms: Option<String>,
}

impl Person {
    fn new(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            sms: None,
        }
    }
}

fn email(p: &Person) -> Option<&str> {
    p.email.as_deref()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn rules(options: &ValidatorOptions) -> EmailRules<Person> {
    EmailRules::new().rule("email", email, EmailValidator::new(options).unwrap())
}

#[test]
fn test_no_options() {
    init_tracing();
    let rules = rules(&ValidatorOptions::new());
    let mut person = Person::new("valid@example.com");
    assert!(rules.is_valid(&person));

    person.email = Some("invalid.@example.com".into());
    let errors = rules.validate(&person);
    assert!(!errors.is_empty());
    assert_eq!(errors.messages("email"), vec!["is invalid"]);

    person.email = None;
    let errors = rules.validate(&person);
    assert_eq!(errors.messages("email"), vec!["can't be blank"]);
    assert_eq!(errors.full_messages(), vec!["email can't be blank"]);
}

#[test]
fn test_allow_nil() {
    let rules = rules(&ValidatorOptions::new().allow_nil(true));
    let mut person = Person::new("valid@example.com");
    assert!(rules.is_valid(&person));

    person.email = Some("invalid.@example.com".into());
    assert_eq!(rules.validate(&person).get("email"), vec![FieldError::Invalid]);

    person.email = None;
    assert!(rules.is_valid(&person));
}

#[test]
fn test_conditional_rule() {
    let rules = EmailRules::new().rule_if(
        "email",
        email,
        EmailValidator::new(&ValidatorOptions::new()).unwrap(),
        |p: &Person| p.sms.is_none(),
    );
    let mut person = Person::new("valid@example.com");
    assert!(rules.is_valid(&person));

    person.email = Some("invalid.@example.com".into());
    assert!(!rules.is_valid(&person));

    person.sms = Some("00000000000".into());
    assert!(rules.is_valid(&person));
}

#[test]
fn test_parser_option_on_rule() {
    let options = ValidatorOptions::new().parser(ParserOverrides {
        allow_local_end_with_dot: Some(true),
        ..ParserOverrides::default()
    });
    let rules = rules(&options);
    let mut person = Person::new("valid@example.com");
    assert!(rules.is_valid(&person));

    person.email = Some("invalid.@example.com".into());
    assert!(rules.is_valid(&person));

    person.email = Some(".invalid@example.com".into());
    assert_eq!(rules.validate(&person).messages("email"), vec!["is invalid"]);
}

#[test]
fn test_default_parser_options() {
    let defaults = ParserOptions::new().with_local_end_with_dot(true);
    let validator = EmailValidator::with_defaults(defaults, &ValidatorOptions::new()).unwrap();
    let rules = EmailRules::new().rule("email", email, validator);

    let mut person = Person::new("invalid.@example.com");
    assert!(rules.is_valid(&person));

    person.email = Some(".invalid@example.com".into());
    assert_eq!(rules.validate(&person).messages("email"), vec!["is invalid"]);
}

#[test]
fn test_multiple_fields_keep_order() {
    let strict = EmailValidator::new(&ValidatorOptions::new()).unwrap();
    let rules = EmailRules::new()
        .rule("email", email, strict)
        .rule("sms", |p: &Person| p.sms.as_deref(), strict);

    let person = Person {
        email: Some("()@b".into()),
        sms: None,
    };
    let errors = rules.validate(&person);
    assert_eq!(errors.len(), 2);
    let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec!["email", "sms"]);
}

#[test]
fn test_address_literal_is_setup_error() {
    let options = ValidatorOptions::new().parser(ParserOverrides {
        allow_address_literal: Some(true),
        ..ParserOverrides::default()
    });
    assert!(EmailValidator::new(&options).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_options_from_json() {
    let options: ValidatorOptions =
        serde_json::from_str(r#"{"allow_nil": true, "allow_local_begin_with_dot": true}"#).unwrap();
    let rules = rules(&options);
    assert!(rules.is_valid(&Person::default()));
    assert!(rules.is_valid(&Person::new(".valid@example.com")));
}
