//! Pre-invocation checks: owner, channel type, permissions.

use crate::command::{ChannelRestriction, CommandDefinition};
use crate::context::InvocationContext;

pub const OWNER_ONLY: &str = "Only the bot owner can run this command!";
pub const MISSING_PERMISSIONS: &str = "Invalid permissions!";

#[derive(Debug)]
pub(crate) enum GateError {
    /// Shown to the user through the error-signal handler.
    Denied(String),
    Fault(anyhow::Error),
}

pub(crate) fn channel_denied(restriction: ChannelRestriction) -> String {
    format!(
        "This command is not applicable in this channel type! It can only be executed in {} channels!",
        restriction.label()
    )
}

/// Run every gate for `definition`, in order: owner, channel, permissions.
///
/// The permission lookup only happens in guilds; DMs have no permissions to
/// check.
pub(crate) async fn check(
    ctx: &InvocationContext,
    definition: &CommandDefinition,
) -> Result<(), GateError> {
    if definition.owner_only && !ctx.is_owner() {
        return Err(GateError::Denied(OWNER_ONLY.to_string()));
    }

    if !definition.channel.allows(ctx.is_direct()) {
        return Err(GateError::Denied(channel_denied(definition.channel)));
    }

    if !definition.permissions.is_empty()
        && let Some(guild) = ctx.guild_id()
    {
        let effective = ctx
            .platform()
            .effective_permissions(guild, ctx.channel_id(), ctx.author().id)
            .await
            .map_err(|e| GateError::Fault(e.into()))?;
        if !effective.satisfies(definition.permissions) {
            return Err(GateError::Denied(MISSING_PERMISSIONS.to_string()));
        }
    }

    Ok(())
}
