//! Chat-platform entities seen by the router.
//!
//! These are plain data snapshots handed over by the [`Platform`](crate::platform::Platform)
//! collaborator. The router never mutates them.

use chrono::{DateTime, Utc};
use harmony_lexer::{Snowflake, channel_mention, role_mention, user_mention};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub discriminator: String,
    /// Bot accounts never trigger commands.
    pub bot: bool,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: Snowflake::new(id),
            name: name.into(),
            discriminator: "0000".to_string(),
            bot: false,
        }
    }

    /// `<@id>`
    pub fn mention(&self) -> String {
        user_mention(self.id)
    }

    /// `name#discriminator`
    pub fn tag(&self) -> String {
        format!("{}#{}", self.name, self.discriminator)
    }
}

/// A user's membership in a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: User,
    pub guild_id: Snowflake,
    pub nickname: Option<String>,
}

impl Member {
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user.name)
    }

    pub fn mention(&self) -> String {
        self.user.mention()
    }
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
}

impl Role {
    pub fn mention(&self) -> String {
        role_mention(self.id)
    }
}

/// A text channel. `guild_id` is `None` for direct-message channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub name: String,
}

impl Channel {
    pub fn mention(&self) -> String {
        channel_mention(self.id)
    }

    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }
}

/// A guild (server).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
}

/// One inbound message.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    /// `None` in direct messages.
    pub guild_id: Option<Snowflake>,
    pub author: User,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageEvent {
    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }
}

/// Who the bot is and who owns it.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub user: User,
    pub owner_id: Snowflake,
}
