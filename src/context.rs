//! Per-dispatch invocation context.

use std::sync::Arc;

use harmony_lexer::Snowflake;

use crate::error::PlatformError;
use crate::model::{Channel, Guild, Member, MessageEvent, User};
use crate::platform::Platform;
use crate::router::Router;

/// Everything a converter or handler knows about the message being handled.
///
/// Created fresh for each dispatch and never mutated. Cloning is cheap.
#[derive(Clone)]
pub struct InvocationContext {
    router: Arc<Router>,
    event: Arc<MessageEvent>,
}

impl InvocationContext {
    pub fn new(router: Arc<Router>, event: Arc<MessageEvent>) -> Self {
        Self { router, event }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        self.router.platform()
    }

    pub fn event(&self) -> &MessageEvent {
        &self.event
    }

    pub fn author(&self) -> &User {
        &self.event.author
    }

    /// The bot's own account.
    pub fn bot(&self) -> &User {
        &self.router.identity().user
    }

    pub fn channel_id(&self) -> Snowflake {
        self.event.channel_id
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.event.guild_id
    }

    pub fn message_id(&self) -> Snowflake {
        self.event.message_id
    }

    pub fn is_direct(&self) -> bool {
        self.event.is_direct()
    }

    pub fn is_owner(&self) -> bool {
        self.event.author.id == self.router.identity().owner_id
    }

    pub async fn channel(&self) -> Result<Option<Channel>, PlatformError> {
        self.platform().channel(self.event.channel_id).await
    }

    pub async fn guild(&self) -> Result<Option<Guild>, PlatformError> {
        match self.event.guild_id {
            Some(id) => self.platform().guild(id).await,
            None => Ok(None),
        }
    }

    /// The author's guild membership, `None` in direct messages.
    pub async fn member(&self) -> Result<Option<Member>, PlatformError> {
        match self.event.guild_id {
            Some(guild) => self.platform().member(guild, self.event.author.id).await,
            None => Ok(None),
        }
    }

    /// Send `content` to the invoking channel.
    pub async fn reply(&self, content: &str) -> Result<Snowflake, PlatformError> {
        self.platform().send_message(self.event.channel_id, content).await
    }

    /// React to the invoking message.
    pub async fn react(&self, emoji: &str) -> Result<(), PlatformError> {
        self.platform()
            .add_reaction(self.event.channel_id, self.event.message_id, emoji)
            .await
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("message_id", &self.event.message_id)
            .field("channel_id", &self.event.channel_id)
            .field("guild_id", &self.event.guild_id)
            .field("author", &self.event.author.id)
            .finish()
    }
}
