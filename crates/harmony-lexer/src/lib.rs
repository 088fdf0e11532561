//! # harmony-lexer
//!
//! Text-level parsing for chat bot command lines.
//!
//! ## Features
//!
//! - Argument tokenizing with single/double quotes and backslash escapes
//! - Prefix stripping and command-name extraction
//! - Mention parsing (`<@id>`, `<@!id>`, `<@&id>`, `<#id>`)
//! - [`Snowflake`] platform identifiers
//!
//! Nothing in this crate is async or knows about registered commands; the
//! router crate builds on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use harmony_lexer::{split_command, strip_prefix, tokenize};
//!
//! let rest = strip_prefix("!ban \"bad actor\" spam", "!").unwrap();
//! let (name, args) = split_command(rest).unwrap();
//! assert_eq!(name, "ban");
//! assert_eq!(tokenize(args), vec!["bad actor", "spam"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod invocation;
pub mod mention;
pub mod snowflake;
pub mod tokenize;

pub use error::LexError;
pub use invocation::{split_command, strip_prefix};
pub use mention::{
    channel_mention, nickname_mention, parse_mention, role_mention, user_mention, Mention,
};
pub use snowflake::Snowflake;
pub use tokenize::tokenize;
