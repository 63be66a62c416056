//! # emailparser-validator
//!
//! Field validation on top of [`emailparser`]: one parser per rule, blank
//! handling for missing values, and per-field error collection.
//!
//! ## Quick Start
//!
//! ```
//! use emailparser::ParserOptions;
//! use emailparser_validator::{EmailValidator, FieldError, ValidatorOptions};
//!
//! // Shared defaults, overridden per rule.
//! let defaults = ParserOptions::new().with_local_end_with_dot(true);
//! let validator = EmailValidator::with_defaults(defaults, &ValidatorOptions::new())?;
//!
//! assert_eq!(validator.validate(Some("user.@example.com")), Ok(()));
//! assert_eq!(validator.validate(Some(".user@example.com")), Err(FieldError::Invalid));
//! assert_eq!(validator.validate(None), Err(FieldError::Blank));
//! # Ok::<(), emailparser::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod options;
mod validator;

pub use error::{Errors, FieldError};
pub use options::{ParserOverrides, ValidatorOptions};
pub use validator::{Accessor, Condition, EmailRules, EmailValidator};
