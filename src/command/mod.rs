//! Command declaration, compilation and lookup.
//!
//! - [`spec`]: what discovery mechanisms produce ([`CommandSpec`], [`CommandBuilder`])
//! - [`definition`]: the compiled, immutable form with its overload tree
//! - [`tree`]: the overload trie and candidate ordering
//! - [`registry`]: concurrent name/alias lookup
//! - [`help`]: the built-in help command

pub mod definition;
pub mod handle;
pub mod help;
pub mod registry;
pub mod spec;
pub mod tree;

pub use definition::{CommandDefinition, VariantDefinition};
pub use handle::InvokeHandle;
pub use help::{HelpField, HelpPage, help_command};
pub use registry::CommandRegistry;
pub use spec::{
    ArgumentInfo, ChannelRestriction, CommandBuilder, CommandSource, CommandSpec, Handler,
    Invocation, VariantSpec, arg, context_arg, handler,
};
pub use tree::{Node, generate_candidates};
