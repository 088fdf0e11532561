//! Textual prefix providers.
//!
//! A provider answers "what prefix marks a command here?". `None` means only
//! a mention of the bot counts; `Some("")` means every message is a command
//! attempt.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use harmony_lexer::Snowflake;

use crate::config::{PrefixConfig, PrefixMode};
use crate::model::User;

#[async_trait]
pub trait PrefixProvider: Send + Sync + 'static {
    async fn guild_prefix(&self, guild: Snowflake, channel: Snowflake) -> Option<String>;

    async fn dm_prefix(&self, author: &User) -> Option<String>;
}

/// The same prefix everywhere.
#[derive(Debug, Clone)]
pub struct StaticPrefix(pub String);

impl StaticPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

#[async_trait]
impl PrefixProvider for StaticPrefix {
    async fn guild_prefix(&self, _guild: Snowflake, _channel: Snowflake) -> Option<String> {
        Some(self.0.clone())
    }

    async fn dm_prefix(&self, _author: &User) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No textual prefix: commands must start with a mention of the bot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrefix;

#[async_trait]
impl PrefixProvider for NoPrefix {
    async fn guild_prefix(&self, _guild: Snowflake, _channel: Snowflake) -> Option<String> {
        None
    }

    async fn dm_prefix(&self, _author: &User) -> Option<String> {
        None
    }
}

/// Every message is a command attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPrefix;

#[async_trait]
impl PrefixProvider for EmptyPrefix {
    async fn guild_prefix(&self, _guild: Snowflake, _channel: Snowflake) -> Option<String> {
        Some(String::new())
    }

    async fn dm_prefix(&self, _author: &User) -> Option<String> {
        Some(String::new())
    }
}

/// Per-guild prefixes with a fallback for guilds without one and for DMs.
#[derive(Debug, Default)]
pub struct GuildPrefixes {
    prefixes: DashMap<Snowflake, String>,
    fallback: Option<String>,
}

impl GuildPrefixes {
    pub fn new(fallback: Option<String>) -> Self {
        Self {
            prefixes: DashMap::new(),
            fallback,
        }
    }

    pub fn set(&self, guild: Snowflake, prefix: impl Into<String>) {
        self.prefixes.insert(guild, prefix.into());
    }

    pub fn remove(&self, guild: Snowflake) -> Option<String> {
        self.prefixes.remove(&guild).map(|(_, prefix)| prefix)
    }
}

#[async_trait]
impl PrefixProvider for GuildPrefixes {
    async fn guild_prefix(&self, guild: Snowflake, _channel: Snowflake) -> Option<String> {
        self.prefixes
            .get(&guild)
            .map(|p| p.value().clone())
            .or_else(|| self.fallback.clone())
    }

    async fn dm_prefix(&self, _author: &User) -> Option<String> {
        self.fallback.clone()
    }
}

/// The provider implied by `[prefix] mode`.
pub fn from_config(config: &PrefixConfig) -> Arc<dyn PrefixProvider> {
    match config.mode {
        PrefixMode::Static => Arc::new(StaticPrefix::new(config.value.clone())),
        PrefixMode::MentionOnly => Arc::new(NoPrefix),
        PrefixMode::NoneRequired => Arc::new(EmptyPrefix),
    }
}
