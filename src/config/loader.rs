use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::storage::LocalStorage;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/phonics-garden/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("phonics-garden").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The player name is not blank
    /// - The speech bind address is a socket address
    /// - Voice prosody is within the range speech engines accept
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.name.trim().is_empty() {
            return Err(invalid("player.name must not be empty"));
        }

        if self.speech.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(invalid(format!(
                "speech.bind_addr '{}' is not a valid host:port address",
                self.speech.bind_addr
            )));
        }

        let voice = &self.voice;
        if !(0.1..=10.0).contains(&voice.rate) {
            return Err(invalid(format!("voice.rate {} is outside 0.1..=10", voice.rate)));
        }
        if !(0.0..=2.0).contains(&voice.pitch) {
            return Err(invalid(format!("voice.pitch {} is outside 0..=2", voice.pitch)));
        }
        if !(0.0..=1.0).contains(&voice.volume) {
            return Err(invalid(format!("voice.volume {} is outside 0..=1", voice.volume)));
        }

        if self.cloud.timeout_seconds == 0 || self.speech.timeout_seconds == 0 {
            return Err(invalid("timeout_seconds must be greater than zero"));
        }

        Ok(())
    }

    /// Where the game state lives: `storage.state_path` or the platform default.
    pub fn state_path(&self) -> PathBuf {
        self.storage
            .state_path
            .clone()
            .unwrap_or_else(LocalStorage::default_path)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
