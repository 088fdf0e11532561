//! Built-in argument converters.

use async_trait::async_trait;
use harmony_lexer::{Mention, Snowflake, parse_mention};

use super::{ArgValue, ArgumentConverter, ArgumentTypeId};
use crate::context::InvocationContext;
use crate::error::ConvertError;
use crate::model::{Channel, Guild, Member, Role, User};

/// Reserved: yields the invocation context itself, ignoring the token.
pub struct ContextConverter;

#[async_trait]
impl ArgumentConverter for ContextConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::context()
    }

    async fn convert(&self, ctx: &InvocationContext, _token: &str) -> Result<ArgValue, ConvertError> {
        Ok(Box::new(ctx.clone()))
    }
}

/// Reserved: the token as-is.
pub struct StringConverter;

#[async_trait]
impl ArgumentConverter for StringConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::string()
    }

    async fn convert(&self, _ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        Ok(Box::new(token.to_string()))
    }
}

/// Case-insensitive `true/false`, `yes/no`, `on/off`, `1/0`.
pub fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

pub struct BoolConverter;

#[async_trait]
impl ArgumentConverter for BoolConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<bool>()
    }

    async fn convert(&self, _ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        parse_bool(token)
            .map(|b| Box::new(b) as ArgValue)
            .ok_or_else(|| ConvertError::mismatch(format!("{token:?} is not a boolean")))
    }
}

/// `<@id>`/`<@!id>` or a bare id. Other mention kinds are a mismatch.
fn user_id(token: &str) -> Result<Option<Snowflake>, ConvertError> {
    match parse_mention(token) {
        Some(mention) => mention
            .user_id()
            .map(Some)
            .ok_or_else(|| ConvertError::mismatch(format!("{token:?} is not a user mention"))),
        None => Ok(token.parse::<Snowflake>().ok()),
    }
}

async fn resolve_user(ctx: &InvocationContext, token: &str) -> Result<User, ConvertError> {
    let author = ctx.author();
    let bot = ctx.bot();

    if let Some(id) = user_id(token)? {
        if id == author.id {
            return Ok(author.clone());
        }
        if id == bot.id {
            return Ok(bot.clone());
        }
        return ctx
            .platform()
            .user(id)
            .await?
            .ok_or_else(|| ConvertError::mismatch(format!("unknown user {id}")));
    }

    if author.tag() == token {
        return Ok(author.clone());
    }
    if bot.tag() == token {
        return Ok(bot.clone());
    }

    let Some((name, discriminator)) = token.rsplit_once('#') else {
        return Err(ConvertError::mismatch(format!("{token:?} does not name a user")));
    };
    let Some(guild) = ctx.guild_id() else {
        return Err(ConvertError::mismatch("user tags only resolve inside a guild"));
    };

    ctx.platform()
        .members(guild)
        .await?
        .into_iter()
        .map(|member| member.user)
        .find(|user| user.name == name && user.discriminator == discriminator)
        .ok_or_else(|| ConvertError::mismatch(format!("no member tagged {token:?}")))
}

pub struct UserConverter;

#[async_trait]
impl ArgumentConverter for UserConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<User>()
    }

    async fn convert(&self, ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        Ok(Box::new(resolve_user(ctx, token).await?))
    }
}

pub struct MemberConverter;

#[async_trait]
impl ArgumentConverter for MemberConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<Member>()
    }

    async fn convert(&self, ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        let Some(guild) = ctx.guild_id() else {
            return Err(ConvertError::mismatch("members only exist inside a guild"));
        };
        let user = resolve_user(ctx, token).await?;
        let member = ctx
            .platform()
            .member(guild, user.id)
            .await?
            .ok_or_else(|| ConvertError::mismatch(format!("{} is not a member", user.tag())))?;
        Ok(Box::new(member))
    }
}

pub struct RoleConverter;

#[async_trait]
impl ArgumentConverter for RoleConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<Role>()
    }

    async fn convert(&self, ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        let Some(guild) = ctx.guild_id() else {
            return Err(ConvertError::mismatch("roles only exist inside a guild"));
        };

        let id = match parse_mention(token) {
            Some(Mention::Role(id)) => Some(id),
            Some(_) => return Err(ConvertError::mismatch(format!("{token:?} is not a role mention"))),
            None => token.parse::<Snowflake>().ok(),
        };

        let role = match id {
            Some(id) => ctx.platform().role(guild, id).await?,
            None => ctx
                .platform()
                .roles(guild)
                .await?
                .into_iter()
                .find(|role| role.name == token),
        };
        role.map(|r| Box::new(r) as ArgValue)
            .ok_or_else(|| ConvertError::mismatch(format!("no role {token:?}")))
    }
}

pub struct ChannelConverter;

#[async_trait]
impl ArgumentConverter for ChannelConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<Channel>()
    }

    async fn convert(&self, ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        let id = match parse_mention(token) {
            Some(Mention::Channel(id)) => Some(id),
            Some(_) => {
                return Err(ConvertError::mismatch(format!("{token:?} is not a channel mention")));
            }
            None => token.parse::<Snowflake>().ok(),
        };

        let channel = match (id, ctx.guild_id()) {
            (Some(id), _) => ctx.platform().channel(id).await?,
            (None, Some(guild)) => ctx
                .platform()
                .channels(guild)
                .await?
                .into_iter()
                .find(|channel| channel.name == token),
            (None, None) => None,
        };
        channel
            .map(|c| Box::new(c) as ArgValue)
            .ok_or_else(|| ConvertError::mismatch(format!("no channel {token:?}")))
    }
}

pub struct GuildConverter;

#[async_trait]
impl ArgumentConverter for GuildConverter {
    fn accepts(&self) -> ArgumentTypeId {
        ArgumentTypeId::of::<Guild>()
    }

    async fn convert(&self, ctx: &InvocationContext, token: &str) -> Result<ArgValue, ConvertError> {
        let guild = match token.parse::<Snowflake>() {
            Ok(id) => ctx.platform().guild(id).await?,
            Err(_) => ctx
                .platform()
                .guilds()
                .await?
                .into_iter()
                .find(|guild| guild.name == token),
        };
        guild
            .map(|g| Box::new(g) as ArgValue)
            .ok_or_else(|| ConvertError::mismatch(format!("no guild {token:?}")))
    }
}
