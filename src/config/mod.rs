//! # Configuration Management Module
//!
//! Idiomix reads an optional TOML file. Every section has defaults, so a missing
//! section (or a missing file, for `play`) simply falls back to them. CLI flags
//! override file values.
//!
//! ## Configuration Structure
//!
//! - [`BotConfig`] - bot name and reply style
//! - [`IdiomsConfig`] - dataset path and optional RNG seed
//! - [`TaggerConfig`] - extra part-of-speech lexicon
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use idiomix::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Bot name: {}", config.bot.name);
//!     println!("Idioms: {}", config.idioms.source);
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [bot]
//! name = "Idiomix"
//! show_meanings = false
//!
//! [idioms]
//! source = "data/english_idioms.csv"
//! # seed = 42
//!
//! [tagger]
//! # lexicon_file = "data/lexicon.json"
//!
//! [logging]
//! level = "info"
//! file = "idiomix.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub idioms: IdiomsConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Name the bot introduces itself with and prefixes replies with.
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Print each bot idiom's meaning right after it.
    #[serde(default)]
    pub show_meanings: bool,
}

fn default_bot_name() -> String {
    "Idiomix".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            show_meanings: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdiomsConfig {
    /// CSV file with `idioms` and `meaning` columns.
    #[serde(default = "default_idiom_source")]
    pub source: String,
    /// Fixed RNG seed for reproducible games; random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_idiom_source() -> String {
    "data/english_idioms.csv".to_string()
}

impl Default for IdiomsConfig {
    fn default() -> Self {
        Self {
            source: default_idiom_source(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// JSON object of extra word → tag entries, e.g. `{"yeet": "VERB"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`.
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some("idiomix.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown strings fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
