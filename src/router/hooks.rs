//! Failure hooks and their defaults.

use async_trait::async_trait;
use tracing::error;

use crate::context::InvocationContext;
use crate::model::MessageEvent;

/// Receives user-actionable failures (gating denials and
/// [`HandlerError::Signal`](crate::HandlerError::Signal)).
#[async_trait]
pub trait ErrorSignalHandler: Send + Sync + 'static {
    async fn on_signal(&self, ctx: &InvocationContext, message: Option<&str>) -> anyhow::Result<()>;
}

/// Replies `🚫 message 🚫`, or reacts with `🚫` when there is no message.
#[derive(Debug, Clone)]
pub struct ReplyWithError {
    emoji: String,
}

impl ReplyWithError {
    pub fn new(emoji: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
        }
    }
}

impl Default for ReplyWithError {
    fn default() -> Self {
        Self::new("🚫")
    }
}

#[async_trait]
impl ErrorSignalHandler for ReplyWithError {
    async fn on_signal(&self, ctx: &InvocationContext, message: Option<&str>) -> anyhow::Result<()> {
        match message {
            Some(text) => {
                ctx.reply(&format!("{0} {text} {0}", self.emoji)).await?;
            }
            None => ctx.react(&self.emoji).await?,
        }
        Ok(())
    }
}

/// Receives every fault that is not a user-actionable failure.
#[async_trait]
pub trait UncaughtErrorHandler: Send + Sync + 'static {
    async fn on_uncaught(&self, event: &MessageEvent, command: Option<&str>, error: &anyhow::Error);
}

/// Logs and moves on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogUncaughtErrors;

#[async_trait]
impl UncaughtErrorHandler for LogUncaughtErrors {
    async fn on_uncaught(&self, event: &MessageEvent, command: Option<&str>, error: &anyhow::Error) {
        error!(
            message = %event.message_id,
            channel = %event.channel_id,
            command = command.unwrap_or("-"),
            error = %format!("{error:#}"),
            "Uncaught error while handling message"
        );
    }
}
