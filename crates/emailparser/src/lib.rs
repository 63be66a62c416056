//! # emailparser
//!
//! Email address validation and parsing against a configurable subset of the
//! RFC 5321/5322 `addr-spec` grammar.
//!
//! ## Features
//!
//! - **Structured parse tree**: local part (quoted or dot-string) and domain
//!   labels, borrowed from the input
//! - **Boolean validation**: [`Parser::is_valid`] never returns an error
//! - **Configurable local-part dots**: leading, trailing and repeated dots
//!   can each be allowed separately
//! - **Strict domains**: letter-initial labels, internal hyphens only
//!
//! ## Quick Start
//!
//! ```
//! use emailparser::{Parser, ParserOptions};
//!
//! let parser = Parser::default();
//! assert!(parser.is_valid("john.doe@example.com"));
//! assert!(!parser.is_valid("john..doe@example.com"));
//!
//! let lenient = Parser::new(ParserOptions::new().with_dot_sequence_in_local(true))?;
//! assert!(lenient.is_valid("john..doe@example.com"));
//!
//! let mailbox = parser.parse("\"john doe\"@example.com")?;
//! assert!(mailbox.local_part().is_quoted());
//! assert_eq!(mailbox.domain().labels(), &["example", "com"]);
//! # Ok::<(), emailparser::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`charset`]: Character classes of the grammar
//! - [`tree`]: Typed and generic parse trees

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod charset;
mod cursor;
mod error;
mod options;
mod parser;
pub mod tree;

pub use error::{Error, Expected, Result};
pub use options::ParserOptions;
pub use parser::{Parser, is_valid, parse};
pub use tree::{Mailbox, Node, Production};
