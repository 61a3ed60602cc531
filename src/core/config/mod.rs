//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Two configuration scopes share one schema:
//! - **User**: personal defaults (tool paths, extensions)
//! - **Local**: `.audio-organizer.toml` in the working directory, for a
//!   collection with its own conventions
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. User config file
//! 3. Local config file
//! 4. CLI flags (not handled here)
//!
//! # User Config Locations
//!
//! Searched in order:
//! 1. `$AO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/audio-organizer/config.toml`
//! 3. `~/.audio-organizer/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use audio_organizer::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/music/inbox"))).unwrap();
//! let config = result.config;
//!
//! println!("Sidecar extension: {}", config.sidecar_extension());
//! println!("ffmpeg: {}", config.ffmpeg());
//! ```

pub mod schema;

pub use schema::{FileConfig, SpectrogramDefaults, ToolPaths, IMAGE_FORMATS};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::{DEFAULT_CONFLICT_PREFIX, DEFAULT_SIDECAR_EXTENSION};

/// Environment variable naming an explicit user config file.
pub const CONFIG_ENV: &str = "AO_CONFIG";

/// File name of the local (per-directory) config.
pub const LOCAL_CONFIG_FILE: &str = ".audio-organizer.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence and defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User configuration
    pub user: FileConfig,
    /// Local configuration (if present in the working directory)
    pub local: Option<FileConfig>,
    /// Path to the user config file (if loaded)
    user_path: Option<PathBuf>,
    /// Path to the local config file (if loaded)
    local_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `dir` is provided, also loads `dir/.audio-organizer.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let (user, user_path) = Self::load_user()?;

        let (local, local_path) = match dir.map(|d| d.join(LOCAL_CONFIG_FILE)) {
            Some(path) if path.exists() => (Some(Self::read_config(&path)?), Some(path)),
            _ => (None, None),
        };

        user.validate()?;
        if let Some(ref l) = local {
            l.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                user,
                local,
                user_path,
                local_path,
            },
        })
    }

    /// Load user configuration from standard locations.
    fn load_user() -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $AO_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/audio-organizer/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("audio-organizer/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.audio-organizer/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".audio-organizer/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((FileConfig::default(), None))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for the user config.
    ///
    /// Returns `$AO_CONFIG` if set, else `~/.audio-organizer/config.toml`.
    pub fn user_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".audio-organizer/config.toml"))
    }

    /// Write the user config atomically.
    pub fn write_user(config: &FileConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::user_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed, writes a temp file in the same
    /// directory, then renames it over the target.
    pub fn write_config_atomic(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn effective(&self) -> FileConfig {
        match &self.local {
            Some(local) => self.user.clone().overlay(local.clone()),
            None => self.user.clone(),
        }
    }

    /// Sidecar extension. Defaults to `metadata`.
    pub fn sidecar_extension(&self) -> String {
        self.effective()
            .sidecar_extension
            .unwrap_or_else(|| DEFAULT_SIDECAR_EXTENSION.to_string())
    }

    /// Conflict prefix. Defaults to `CONFLICT.`.
    pub fn conflict_prefix(&self) -> String {
        self.effective()
            .conflict_prefix
            .unwrap_or_else(|| DEFAULT_CONFLICT_PREFIX.to_string())
    }

    fn tool(&self, pick: fn(ToolPaths) -> Option<String>, default: &str) -> String {
        self.effective()
            .tools
            .and_then(pick)
            .unwrap_or_else(|| default.to_string())
    }

    /// `sox` program. Defaults to `sox`.
    pub fn sox(&self) -> String {
        self.tool(|t| t.sox, "sox")
    }

    /// `ffmpeg` program. Defaults to `ffmpeg`.
    pub fn ffmpeg(&self) -> String {
        self.tool(|t| t.ffmpeg, "ffmpeg")
    }

    /// `shnsplit` program. Defaults to `shnsplit`.
    pub fn shnsplit(&self) -> String {
        self.tool(|t| t.shnsplit, "shnsplit")
    }

    /// Spectrogram image format. Defaults to `png`.
    pub fn image_format(&self) -> String {
        self.effective()
            .spectrogram
            .and_then(|s| s.image_format)
            .unwrap_or_else(|| "png".to_string())
    }

    /// Look up a value by dotted key, as used by `config get`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside the schema.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "sidecar_extension" => self.sidecar_extension(),
            "conflict_prefix" => self.conflict_prefix(),
            "tools.sox" => self.sox(),
            "tools.ffmpeg" => self.ffmpeg(),
            "tools.shnsplit" => self.shnsplit(),
            "spectrogram.image_format" => self.image_format(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        })
    }

    /// All keys with their effective values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|&key| self.get(key).ok().map(|v| (key, v)))
            .collect()
    }

    /// Get the path to the loaded user config file.
    pub fn user_config_loaded_from(&self) -> Option<&Path> {
        self.user_path.as_deref()
    }

    /// Get the path to the loaded local config file.
    pub fn local_config_loaded_from(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }
}

/// Every settable key.
pub const KEYS: [&str; 6] = [
    "sidecar_extension",
    "conflict_prefix",
    "tools.sox",
    "tools.ffmpeg",
    "tools.shnsplit",
    "spectrogram.image_format",
];

/// Set a dotted key on a file config.
///
/// # Errors
///
/// Returns `ConfigError::UnknownKey` for keys outside the schema and
/// `ConfigError::InvalidValue` if the result fails validation.
pub fn set_key(config: &mut FileConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = Some(value.to_string());
    match key {
        "sidecar_extension" => config.sidecar_extension = value,
        "conflict_prefix" => config.conflict_prefix = value,
        "tools.sox" => config.tools.get_or_insert_with(Default::default).sox = value,
        "tools.ffmpeg" => config.tools.get_or_insert_with(Default::default).ffmpeg = value,
        "tools.shnsplit" => config.tools.get_or_insert_with(Default::default).shnsplit = value,
        "spectrogram.image_format" => {
            config
                .spectrogram
                .get_or_insert_with(Default::default)
                .image_format = value
        }
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    config.validate()
}
