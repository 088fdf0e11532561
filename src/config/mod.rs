//! Configuration loading and management.
//!
//! - [`types`]: Config struct definitions and defaults
//! - [`validation`]: Startup validation collecting every problem at once

mod types;
mod validation;

pub use types::{
    BotConfig, Config, ConfigError, HelpConfig, PrefixConfig, PrefixMode, RenderConfig,
    TypoConfig,
};
pub use validation::{ValidationError, validate};
