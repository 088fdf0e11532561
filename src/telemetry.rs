//! Telemetry utilities for command timing and dispatch spans.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Seconds elapsed since `timestamp`, negative if it lies in the future.
pub fn lag_seconds(timestamp: chrono::DateTime<chrono::Utc>) -> f64 {
    let lag = chrono::Utc::now() - timestamp;
    lag.num_milliseconds() as f64 / 1000.0
}

/// Standardized span constructors for dispatch observability.
pub mod spans {
    use crate::model::MessageEvent;
    use tracing::{Span, debug_span, info_span};
    use uuid::Uuid;

    /// Create a span for the processing of one inbound message.
    pub fn dispatch(event: &MessageEvent) -> Span {
        info_span!(
            "harmony.dispatch",
            dispatch_id = %Uuid::new_v4(),
            message = %event.message_id,
            channel = %event.channel_id,
            guild = event.guild_id.map(|g| g.get()),
            author = %event.author.id,
        )
    }

    /// Create a span for one candidate attempt within a dispatch.
    pub fn candidate(command: &str, variant: usize, arity: usize) -> Span {
        debug_span!("harmony.candidate", command = %command, variant, arity)
    }
}
