//! The chat-platform collaborator.
//!
//! The router performs no network I/O of its own. Everything it needs from
//! the outside world (sending replies, reacting, entity lookups, permission
//! resolution) goes through this trait, which integrators implement on top
//! of their gateway/REST client.

use async_trait::async_trait;
use harmony_lexer::Snowflake;

use crate::error::PlatformError;
use crate::model::{Channel, Guild, Member, Role, User};
use crate::permissions::Permissions;

pub type PlatformResult<T> = Result<T, PlatformError>;

#[async_trait]
pub trait Platform: Send + Sync + 'static {
    /// Send a text message, returning the new message's id.
    async fn send_message(&self, channel: Snowflake, content: &str) -> PlatformResult<Snowflake>;

    /// React to a message with a unicode emoji.
    async fn add_reaction(
        &self,
        channel: Snowflake,
        message: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()>;

    /// Effective permissions of `user` in `channel` of `guild`.
    async fn effective_permissions(
        &self,
        guild: Snowflake,
        channel: Snowflake,
        user: Snowflake,
    ) -> PlatformResult<Permissions>;

    async fn user(&self, id: Snowflake) -> PlatformResult<Option<User>>;

    async fn member(&self, guild: Snowflake, user: Snowflake) -> PlatformResult<Option<Member>>;

    async fn members(&self, guild: Snowflake) -> PlatformResult<Vec<Member>>;

    async fn role(&self, guild: Snowflake, id: Snowflake) -> PlatformResult<Option<Role>>;

    async fn roles(&self, guild: Snowflake) -> PlatformResult<Vec<Role>>;

    async fn channel(&self, id: Snowflake) -> PlatformResult<Option<Channel>>;

    async fn channels(&self, guild: Snowflake) -> PlatformResult<Vec<Channel>>;

    async fn guild(&self, id: Snowflake) -> PlatformResult<Option<Guild>>;

    /// Guilds the bot is a member of.
    async fn guilds(&self) -> PlatformResult<Vec<Guild>>;

    /// Wait for `user` to react to `message`, returning the emoji.
    ///
    /// Callers bound the wait with their own timeout. The default answers
    /// `Ok(None)` at once, so prompts built on it read every question as
    /// declined; platforms with reaction events should override it.
    async fn await_reaction(
        &self,
        _channel: Snowflake,
        _message: Snowflake,
        _user: Snowflake,
    ) -> PlatformResult<Option<String>> {
        Ok(None)
    }
}
