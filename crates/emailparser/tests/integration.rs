//! Integration tests for the address parser.
//!
//! Covers the public API end to end: scenario tables for every option, tree
//! shape checks, and property tests for total consumption and option
//! independence.

#![allow(clippy::unwrap_used)]

use emailparser::{Error, Expected, Parser, ParserOptions, Production};
use proptest::prelude::*;

/// Every combination of the three local-part dot flags.
fn all_dot_flag_combinations() -> Vec<ParserOptions> {
    let mut out = Vec::new();
    for bits in 0..8u8 {
        out.push(
            ParserOptions::new()
                .with_dot_sequence_in_local(bits & 1 != 0)
                .with_local_begin_with_dot(bits & 2 != 0)
                .with_local_end_with_dot(bits & 4 != 0),
        );
    }
    out
}

#[test]
fn test_validity_scenarios() {
    let sequence = ParserOptions::new().with_dot_sequence_in_local(true);
    let begin = ParserOptions::new().with_local_begin_with_dot(true);
    let end = ParserOptions::new().with_local_end_with_dot(true);
    let none = ParserOptions::default();

    let cases: &[(&str, bool, ParserOptions)] = &[
        ("a@b", true, none),
        ("a.b.c@b", true, none),
        ("abcABC012!#$%&'*+-/=?^_`{|}~@b", true, none),
        ("()@b", false, none),
        ("\"()\"@b", true, none),
        (r#""\a"@b"#, true, none),
        ("a@b.c", true, none),
        ("a@0b", false, none),
        ("a@b0", true, none),
        ("a@b-", false, none),
        ("a@b-.c", false, none),
        ("a..b@b", false, none),
        ("a..b@b", true, sequence),
        (".a@b", false, none),
        (".a@b", true, begin),
        ("a.@b", false, none),
        ("a.@b", true, end),
    ];

    for (input, expected, options) in cases {
        let parser = Parser::new(*options).unwrap();
        assert_eq!(
            parser.is_valid(input),
            *expected,
            "{input} with {options:?}"
        );
    }
}

#[test]
fn test_hyphenated_label_takes_one_character_per_hyphen() {
    let parser = Parser::default();
    assert!(parser.is_valid("a@bb-c"));
    assert!(parser.is_valid("a@b-c-d.e"));
    assert!(!parser.is_valid("a@bb-cc"));
    assert_eq!(
        parser.parse("a@bb-cc").unwrap_err(),
        Error::Parse {
            position: 6,
            expected: Expected::EndOfInput
        }
    );
}

#[test]
fn test_domain_rejections_ignore_local_flags() {
    for options in all_dot_flag_combinations() {
        let parser = Parser::new(options).unwrap();
        for input in ["a@b-.c", "a@0b", "a@b-", "a@.b", "a@b.", "a@b..c", "a@", "a@[1.2.3.4]"] {
            assert!(!parser.is_valid(input), "{input} with {options:?}");
        }
    }
}

#[test]
fn test_quoted_local_part_unaffected_by_dots() {
    let parser = Parser::default();
    assert!(parser.is_valid("\"a..b\"@example.com"));
    assert!(parser.is_valid("\".a.\"@example.com"));
    assert!(parser.is_valid(r#""with \"escaped\" quotes"@example.com"#));
    assert!(!parser.is_valid("\"\"@example.com"));
    assert!(!parser.is_valid("\"unterminated@example.com"));
    assert!(!parser.is_valid(r#""bad\"@example.com"#));
}

#[test]
fn test_generic_tree_shape() {
    let mailbox = Parser::default().parse("john.doe@mail.example.com").unwrap();
    let node = mailbox.to_node();

    assert_eq!(node.production(), Production::Mailbox);
    let local = &node.children()[0];
    assert_eq!(local.production(), Production::LocalPart);
    assert_eq!(local.children().len(), 1);

    let dot_string = &local.children()[0];
    assert_eq!(dot_string.production(), Production::DotString);
    assert_eq!(dot_string.terminals(), vec!["john", ".", "doe"]);

    let domain = &node.children()[2];
    assert_eq!(domain.production(), Production::Domain);
    let subdomain = &domain.children()[0];
    assert_eq!(
        subdomain.terminals(),
        vec!["mail", ".", "example", ".", "com"]
    );
}

#[test]
fn test_quoted_tree_has_three_children() {
    let mailbox = Parser::default().parse("\"a b\"@c").unwrap();
    let node = mailbox.to_node();
    let quoted = &node.children()[0].children()[0];
    assert_eq!(quoted.production(), Production::QuotedString);
    let kinds: Vec<_> = quoted.children().iter().map(|n| n.production()).collect();
    assert_eq!(
        kinds,
        vec![
            Production::Dquote,
            Production::QuotedContent,
            Production::Dquote
        ]
    );
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = Parser::new(ParserOptions::new().with_local_end_with_dot(true)).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let input = format!("user{i}.@example.com");
                parser.is_valid(&input)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

proptest! {
    #[test]
    fn prop_accepted_input_is_fully_consumed(input in "[a-c0-9.\"\\\\@()\\- ]{0,16}") {
        for options in all_dot_flag_combinations() {
            let parser = Parser::new(options).unwrap();
            let parsed = parser.parse(&input);
            prop_assert_eq!(parser.is_valid(&input), parsed.is_ok());
            if let Ok(mailbox) = parsed {
                prop_assert_eq!(mailbox.to_node().source(), input.clone());
                prop_assert_eq!(mailbox.to_string(), input.clone());
            }
        }
    }

    #[test]
    fn prop_well_formed_addresses_accepted(
        input in "[a-z0-9_+]{1,6}(\\.[a-z0-9_+]{1,6}){0,3}@[a-z][a-z0-9]{0,5}(-[a-z0-9]){0,2}(\\.[a-z][a-z0-9]{0,5}){0,3}"
    ) {
        let mailbox = Parser::default().parse(&input);
        prop_assert!(mailbox.is_ok(), "{}", input);
        prop_assert_eq!(mailbox.unwrap().to_string(), input);
    }

    #[test]
    fn prop_parse_is_idempotent(input in "[a-z.\"@\\-]{0,12}") {
        let parser = Parser::default();
        prop_assert_eq!(parser.parse(&input), parser.parse(&input));
    }

    #[test]
    fn prop_dot_flags_do_not_affect_domain(domain in "[a-z0-9.\\-\\[\\]]{0,12}") {
        let input = format!("local@{domain}");
        let expected = Parser::default().is_valid(&input);
        for options in all_dot_flag_combinations() {
            prop_assert_eq!(Parser::new(options).unwrap().is_valid(&input), expected);
        }
    }
}
