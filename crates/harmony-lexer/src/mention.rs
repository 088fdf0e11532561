//! Mention parsing and rendering.
//!
//! Chat platforms embed references to entities inline:
//!
//! ```text
//! <@id>    user
//! <@!id>   user, rendered with their nickname
//! <@&id>   role
//! <#id>    channel
//! ```

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::LexError;
use crate::snowflake::Snowflake;

/// A parsed mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mention {
    /// `<@id>`
    User(Snowflake),
    /// `<@!id>`
    Nickname(Snowflake),
    /// `<@&id>`
    Role(Snowflake),
    /// `<#id>`
    Channel(Snowflake),
}

impl Mention {
    /// The referenced id, whatever its kind.
    pub fn id(&self) -> Snowflake {
        match *self {
            Self::User(id) | Self::Nickname(id) | Self::Role(id) | Self::Channel(id) => id,
        }
    }

    /// The id if this mention references a user (either form).
    pub fn user_id(&self) -> Option<Snowflake> {
        match *self {
            Self::User(id) | Self::Nickname(id) => Some(id),
            _ => None,
        }
    }
}

impl FromStr for Mention {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mention(s).ok_or_else(|| LexError::InvalidMention(s.to_string()))
    }
}

fn snowflake(input: &str) -> IResult<&str, Snowflake> {
    map_res(digit1, str::parse::<Snowflake>)(input)
}

fn mention(input: &str) -> IResult<&str, Mention> {
    delimited(
        char('<'),
        alt((
            map(preceded(tag("@&"), snowflake), Mention::Role),
            map(preceded(tag("@!"), snowflake), Mention::Nickname),
            map(preceded(char('@'), snowflake), Mention::User),
            map(preceded(char('#'), snowflake), Mention::Channel),
        )),
        char('>'),
    )(input)
}

/// Parse a whole token as a mention. Returns `None` if the token is anything
/// else, including a mention with trailing text.
pub fn parse_mention(token: &str) -> Option<Mention> {
    all_consuming(mention)(token).ok().map(|(_, m)| m)
}

/// Render `<@id>`.
pub fn user_mention(id: Snowflake) -> String {
    format!("<@{id}>")
}

/// Render `<@!id>`.
pub fn nickname_mention(id: Snowflake) -> String {
    format!("<@!{id}>")
}

/// Render `<@&id>`.
pub fn role_mention(id: Snowflake) -> String {
    format!("<@&{id}>")
}

/// Render `<#id>`.
pub fn channel_mention(id: Snowflake) -> String {
    format!("<#{id}>")
}
