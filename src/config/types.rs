//! Core configuration types.

use harmony_lexer::Snowflake;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Router configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// How command messages are recognised.
    #[serde(default)]
    pub prefix: PrefixConfig,
    /// Bot identity overrides.
    #[serde(default)]
    pub bot: BotConfig,
    /// "Did you mean?" suggestions for unknown commands.
    #[serde(default)]
    pub typo: TypoConfig,
    /// Built-in help command.
    #[serde(default)]
    pub help: HelpConfig,
    /// Default result and error rendering.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Which prefix provider the router installs by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMode {
    /// A constant textual prefix (`value`).
    #[default]
    Static,
    /// Only a mention of the bot counts as a prefix.
    MentionOnly,
    /// Every message is a command attempt.
    NoneRequired,
}

/// Prefix configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefixConfig {
    #[serde(default)]
    pub mode: PrefixMode,
    /// Textual prefix used in `static` mode (default: `!`).
    #[serde(default = "default_prefix")]
    pub value: String,
    /// Accept `<@bot>` / `<@!bot>` as a prefix in every mode (default: true).
    #[serde(default = "default_true")]
    pub mention: bool,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            mode: PrefixMode::default(),
            value: default_prefix(),
            mention: true,
        }
    }
}

/// Bot identity configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Overrides the owner reported by the platform.
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
}

/// Typo suggestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TypoConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Minimum Jaro-Winkler similarity for a suggestion (default: 0.6).
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    /// Seconds to wait for the user to answer (default: 60).
    #[serde(default = "default_typo_timeout")]
    pub timeout_secs: u64,
}

impl TypoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_similarity: default_min_similarity(),
            timeout_secs: default_typo_timeout(),
        }
    }
}

/// Help command configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HelpConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_help_name")]
    pub name: String,
    #[serde(default = "default_help_aliases")]
    pub aliases: Vec<String>,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: default_help_name(),
            aliases: default_help_aliases(),
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Emoji wrapped around error signals, or reacted with when there is no text.
    #[serde(default = "default_error_emoji")]
    pub error_emoji: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            error_emoji: default_error_emoji(),
        }
    }
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_similarity() -> f64 {
    0.6
}

fn default_typo_timeout() -> u64 {
    60
}

fn default_help_name() -> String {
    "help".to_string()
}

fn default_help_aliases() -> Vec<String> {
    vec!["man".to_string()]
}

fn default_error_emoji() -> String {
    "🚫".to_string()
}
