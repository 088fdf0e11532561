//! Identities, events and router setup shared by the integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use harmony_router::router::UncaughtErrorHandler;
use harmony_router::{BotIdentity, Config, MessageEvent, Router, RouterBuilder, Snowflake, User};
use parking_lot::Mutex;

use super::platform::MockPlatform;

pub const BOT: u64 = 1;
pub const OWNER: u64 = 2;
pub const ALICE: u64 = 10;
pub const GUILD: u64 = 100;
pub const CHANNEL: u64 = 200;
pub const DM_CHANNEL: u64 = 300;

static NEXT_MESSAGE: AtomicU64 = AtomicU64::new(5_000);

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn bot() -> User {
    User {
        bot: true,
        ..User::new(BOT, "harmony")
    }
}

#[allow(dead_code)]
pub fn owner() -> User {
    User::new(OWNER, "owner")
}

pub fn alice() -> User {
    User {
        discriminator: "0001".to_string(),
        ..User::new(ALICE, "alice")
    }
}

pub fn identity() -> BotIdentity {
    BotIdentity {
        user: bot(),
        owner_id: Snowflake::new(OWNER),
    }
}

/// A message in the test guild's text channel.
pub fn guild_message(author: User, content: &str) -> MessageEvent {
    MessageEvent {
        message_id: Snowflake::new(NEXT_MESSAGE.fetch_add(1, Ordering::SeqCst)),
        channel_id: Snowflake::new(CHANNEL),
        guild_id: Some(Snowflake::new(GUILD)),
        author,
        content: content.to_string(),
        timestamp: chrono::Utc::now(),
    }
}

/// A direct message.
#[allow(dead_code)]
pub fn dm_message(author: User, content: &str) -> MessageEvent {
    MessageEvent {
        guild_id: None,
        channel_id: Snowflake::new(DM_CHANNEL),
        ..guild_message(author, content)
    }
}

pub fn builder(platform: &Arc<MockPlatform>) -> RouterBuilder {
    Router::builder(platform.clone(), identity())
}

/// Router with default config on top of `platform`.
#[allow(dead_code)]
pub fn router(platform: &Arc<MockPlatform>) -> Arc<Router> {
    builder(platform).build()
}

#[allow(dead_code)]
pub fn router_with(platform: &Arc<MockPlatform>, toml: &str) -> Arc<Router> {
    let config = Config::from_toml_str(toml).expect("test config parses");
    builder(platform).config(config).build()
}

/// Uncaught-error handler that keeps every error it sees.
#[derive(Clone, Default)]
pub struct RecordingUncaught {
    pub errors: Arc<Mutex<Vec<(Option<String>, String)>>>,
}

#[allow(dead_code)]
impl RecordingUncaught {
    pub fn messages(&self) -> Vec<String> {
        self.errors.lock().iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn commands(&self) -> Vec<Option<String>> {
        self.errors.lock().iter().map(|(c, _)| c.clone()).collect()
    }
}

#[async_trait]
impl UncaughtErrorHandler for RecordingUncaught {
    async fn on_uncaught(&self, _event: &MessageEvent, command: Option<&str>, error: &anyhow::Error) {
        self.errors
            .lock()
            .push((command.map(str::to_string), format!("{error:#}")));
    }
}
