//! core::config::schema
//!
//! Configuration schema types.
//!
//! # User Config
//!
//! Located at (in order of precedence):
//! 1. `$AO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/audio-organizer/config.toml`
//! 3. `~/.audio-organizer/config.toml` (canonical write location)
//!
//! # Local Config
//!
//! `.audio-organizer.toml` in the working directory, same schema. Values it
//! sets override the user config.
//!
//! # Validation
//!
//! Values are validated after parsing (e.g. the sidecar extension must be a
//! bare extension without dots or separators).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Image formats `sox` can write a spectrogram as.
pub const IMAGE_FORMATS: [&str; 4] = ["png", "jpg", "bmp", "tiff"];

/// Configuration file contents.
///
/// # Example
///
/// ```toml
/// sidecar_extension = "metadata"
/// conflict_prefix = "CONFLICT."
///
/// [tools]
/// ffmpeg = "/usr/local/bin/ffmpeg"
///
/// [spectrogram]
/// image_format = "jpg"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Extension appended to media file names for sidecars
    pub sidecar_extension: Option<String>,

    /// Prefix for outputs renamed to avoid their source
    pub conflict_prefix: Option<String>,

    /// External program locations
    pub tools: Option<ToolPaths>,

    /// Spectrogram defaults
    pub spectrogram: Option<SpectrogramDefaults>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ext) = &self.sidecar_extension {
            validate_extension(ext)?;
        }

        if let Some(prefix) = &self.conflict_prefix {
            if prefix.is_empty() || prefix.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid conflict_prefix '{}': must be non-empty and contain no path separators",
                    prefix
                )));
            }
        }

        if let Some(spectrogram) = &self.spectrogram {
            spectrogram.validate()?;
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`: values set in `other` win.
    pub fn overlay(self, other: FileConfig) -> FileConfig {
        FileConfig {
            sidecar_extension: other.sidecar_extension.or(self.sidecar_extension),
            conflict_prefix: other.conflict_prefix.or(self.conflict_prefix),
            tools: match (self.tools, other.tools) {
                (Some(base), Some(top)) => Some(ToolPaths {
                    sox: top.sox.or(base.sox),
                    ffmpeg: top.ffmpeg.or(base.ffmpeg),
                    shnsplit: top.shnsplit.or(base.shnsplit),
                }),
                (base, top) => top.or(base),
            },
            spectrogram: other.spectrogram.or(self.spectrogram),
        }
    }
}

/// Paths (or names on `$PATH`) of external programs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub sox: Option<String>,
    pub ffmpeg: Option<String>,
    pub shnsplit: Option<String>,
}

/// Spectrogram rendering defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SpectrogramDefaults {
    /// Output image format/extension
    pub image_format: Option<String>,
}

impl SpectrogramDefaults {
    /// Validate the spectrogram settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(format) = &self.image_format {
            if !IMAGE_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid image_format '{}', must be one of: {}",
                    format,
                    IMAGE_FORMATS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Check that `ext` is a bare file extension.
pub fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    if ext.is_empty() || ext.contains(['.', '/', '\\']) {
        return Err(ConfigError::InvalidValue(format!(
            "invalid extension '{}': must be non-empty and contain no dots or path separators",
            ext
        )));
    }
    Ok(())
}
