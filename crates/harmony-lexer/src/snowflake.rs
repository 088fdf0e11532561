//! Platform identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::LexError;

/// A 64-bit identifier for a user, channel, guild, role or message.
///
/// Parses only from plain decimal digits; mention forms are handled by
/// [`crate::mention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Snowflake(u64);

impl Snowflake {
    /// Wrap a raw id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Snowflake {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for Snowflake {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u64::from_str accepts a leading '+', ids never carry one
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LexError::InvalidSnowflake(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| LexError::InvalidSnowflake(s.to_string()))
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_ids() {
        assert_eq!("80351110224678912".parse(), Ok(Snowflake::new(80351110224678912)));
    }

    #[test]
    fn rejects_signs_and_garbage() {
        assert!("+12".parse::<Snowflake>().is_err());
        assert!("".parse::<Snowflake>().is_err());
        assert!("12a".parse::<Snowflake>().is_err());
        assert!("99999999999999999999999".parse::<Snowflake>().is_err());
    }

    #[test]
    fn displays_as_decimal() {
        assert_eq!(Snowflake::new(42).to_string(), "42");
    }
}
