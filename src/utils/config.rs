//! Bot configuration: the Discord token from the environment and embed/player options
//! from an optional JSON file.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level configuration passed to every command through the framework data.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BotConfig {
    pub embed_options: EmbedOptions,
    pub player_options: PlayerOptions,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedOptions {
    pub colors: EmbedColors,
    pub icons: EmbedIcons,
    pub info: EmbedInfo,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedColors {
    pub info: u32,
    pub success: u32,
    pub warning: u32,
    pub error: u32,
}

impl Default for EmbedColors {
    fn default() -> Self {
        Self {
            info: 0x5865f2,
            success: 0x23a55a,
            warning: 0xf0b232,
            error: 0xf23f43,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedIcons {
    pub warning: String,
    pub error: String,
    pub success: String,
    pub audio_playing: String,
    #[serde(rename = "loop")]
    pub loop_mode: String,
    pub autoplay: String,
    pub looping: String,
    pub autoplaying: String,
    pub skipped: String,
    pub next_track: String,
    pub live_track: String,
    pub source_you_tube: String,
    pub source_sound_cloud: String,
    pub source_spotify: String,
    pub source_apple_music: String,
    pub source_arbitrary: String,
}

impl Default for EmbedIcons {
    fn default() -> Self {
        Self {
            warning: "⚠️".to_string(),
            error: "❌".to_string(),
            success: "✅".to_string(),
            audio_playing: "🎶".to_string(),
            loop_mode: "🔁".to_string(),
            autoplay: "♾️".to_string(),
            looping: "🔁".to_string(),
            autoplaying: "♾️".to_string(),
            skipped: "⏭️".to_string(),
            next_track: "⏭️".to_string(),
            live_track: "🔴".to_string(),
            source_you_tube: "📺".to_string(),
            source_sound_cloud: "☁️".to_string(),
            source_spotify: "🟢".to_string(),
            source_apple_music: "🍎".to_string(),
            source_arbitrary: "🔗".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedInfo {
    /// Used as the embed author icon when the guild has no icon.
    pub fallback_icon_url: String,
    pub support_server_invite_url: Option<String>,
}

impl Default for EmbedInfo {
    fn default() -> Self {
        Self {
            fallback_icon_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
            support_server_invite_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerOptions {
    pub progress_bar: ProgressBarOptions,
}

/// Progress bar overrides. Every field is optional and falls back independently.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressBarOptions {
    pub length: Option<usize>,
    pub timecodes: Option<bool>,
    pub indicator: Option<String>,
    pub left_char: Option<String>,
    pub right_char: Option<String>,
}

impl BotConfig {
    /// Load the config file named by `CONFIG_PATH` (or `config.json`).
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Read the bot token from the environment
pub fn discord_token() -> Result<String, ConfigError> {
    env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingEnv("DISCORD_TOKEN"))
}
