//! In-memory platform that records everything the router sends.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use harmony_router::platform::PlatformResult;
use harmony_router::{
    Channel, Guild, Member, Permissions, Platform, PlatformError, Role, Snowflake, User,
};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub channel: Snowflake,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub channel: Snowflake,
    pub message: Snowflake,
    pub emoji: String,
}

#[derive(Default)]
pub struct MockPlatform {
    sent: Mutex<Vec<Sent>>,
    reactions: Mutex<Vec<Reaction>>,
    permissions: Mutex<HashMap<Snowflake, Permissions>>,
    users: Mutex<Vec<User>>,
    members: Mutex<Vec<Member>>,
    roles: Mutex<Vec<Role>>,
    channels: Mutex<Vec<Channel>>,
    guilds: Mutex<Vec<Guild>>,
    reaction_answer: Mutex<Option<String>>,
    permissions_unavailable: AtomicBool,
    permission_lookups: AtomicU64,
    next_message: AtomicU64,
}

#[allow(dead_code)]
impl MockPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_message: AtomicU64::new(900_000),
            ..Self::default()
        })
    }

    pub fn grant(&self, user: Snowflake, permissions: Permissions) {
        self.permissions.lock().insert(user, permissions);
    }

    pub fn fail_permission_lookups(&self) {
        self.permissions_unavailable.store(true, Ordering::SeqCst);
    }

    pub fn permission_lookups(&self) -> u64 {
        self.permission_lookups.load(Ordering::SeqCst)
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().push(user);
    }

    pub fn add_member(&self, guild: Snowflake, user: User, nickname: Option<&str>) {
        self.users.lock().push(user.clone());
        self.members.lock().push(Member {
            user,
            guild_id: guild,
            nickname: nickname.map(str::to_string),
        });
    }

    pub fn add_role(&self, role: Role) {
        self.roles.lock().push(role);
    }

    pub fn add_channel(&self, channel: Channel) {
        self.channels.lock().push(channel);
    }

    pub fn add_guild(&self, guild: Guild) {
        self.guilds.lock().push(guild);
    }

    /// Answer every reaction prompt with `emoji`. Without an answer the
    /// prompt never resolves.
    pub fn answer_reactions_with(&self, emoji: &str) {
        *self.reaction_answer.lock() = Some(emoji.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|s| s.content.clone()).collect()
    }

    pub fn reactions(&self) -> Vec<Reaction> {
        self.reactions.lock().clone()
    }

    pub fn reaction_emojis(&self) -> Vec<String> {
        self.reactions.lock().iter().map(|r| r.emoji.clone()).collect()
    }

    /// Wait until at least `count` messages were sent, or give up after a
    /// second. Returns the texts either way.
    pub async fn wait_for_sent(&self, count: usize) -> Vec<String> {
        let _ = tokio::time::timeout(Duration::from_secs(1), async {
            while self.sent.lock().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        self.sent_texts()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn send_message(&self, channel: Snowflake, content: &str) -> PlatformResult<Snowflake> {
        self.sent.lock().push(Sent {
            channel,
            content: content.to_string(),
        });
        Ok(Snowflake::new(self.next_message.fetch_add(1, Ordering::SeqCst)))
    }

    async fn add_reaction(
        &self,
        channel: Snowflake,
        message: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()> {
        self.reactions.lock().push(Reaction {
            channel,
            message,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn effective_permissions(
        &self,
        _guild: Snowflake,
        _channel: Snowflake,
        user: Snowflake,
    ) -> PlatformResult<Permissions> {
        self.permission_lookups.fetch_add(1, Ordering::SeqCst);
        if self.permissions_unavailable.load(Ordering::SeqCst) {
            return Err(PlatformError::Unavailable);
        }
        Ok(self
            .permissions
            .lock()
            .get(&user)
            .copied()
            .unwrap_or_default())
    }

    async fn user(&self, id: Snowflake) -> PlatformResult<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn member(&self, guild: Snowflake, user: Snowflake) -> PlatformResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .iter()
            .find(|m| m.guild_id == guild && m.user.id == user)
            .cloned())
    }

    async fn members(&self, guild: Snowflake) -> PlatformResult<Vec<Member>> {
        Ok(self
            .members
            .lock()
            .iter()
            .filter(|m| m.guild_id == guild)
            .cloned()
            .collect())
    }

    async fn role(&self, guild: Snowflake, id: Snowflake) -> PlatformResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .iter()
            .find(|r| r.guild_id == guild && r.id == id)
            .cloned())
    }

    async fn roles(&self, guild: Snowflake) -> PlatformResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .iter()
            .filter(|r| r.guild_id == guild)
            .cloned()
            .collect())
    }

    async fn channel(&self, id: Snowflake) -> PlatformResult<Option<Channel>> {
        Ok(self.channels.lock().iter().find(|c| c.id == id).cloned())
    }

    async fn channels(&self, guild: Snowflake) -> PlatformResult<Vec<Channel>> {
        Ok(self
            .channels
            .lock()
            .iter()
            .filter(|c| c.guild_id == Some(guild))
            .cloned()
            .collect())
    }

    async fn guild(&self, id: Snowflake) -> PlatformResult<Option<Guild>> {
        Ok(self.guilds.lock().iter().find(|g| g.id == id).cloned())
    }

    async fn guilds(&self) -> PlatformResult<Vec<Guild>> {
        Ok(self.guilds.lock().clone())
    }

    async fn await_reaction(
        &self,
        _channel: Snowflake,
        _message: Snowflake,
        _user: Snowflake,
    ) -> PlatformResult<Option<String>> {
        let answer = self.reaction_answer.lock().clone();
        match answer {
            Some(emoji) => Ok(Some(emoji)),
            None => std::future::pending().await,
        }
    }
}
