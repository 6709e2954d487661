//! Engine settings: sample rate and stream buffer size.
//!
//! Stored as `plucked.toml` in the user config directory:
//!
//! ```toml
//! sample_rate = 44100.0
//! buffer_size = 1024
//! ```
//!
//! Missing fields fall back to the defaults of [`plucked_core::Context`].

use std::path::Path;

use plucked_core::Context;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FileOp};
use crate::paths;
use crate::validation::validate_settings;

/// Sample rate and edge capacity used to build a [`Context`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthSettings {
    /// Samples per second.
    pub sample_rate: f64,
    /// Capacity of every stream edge, in samples.
    pub buffer_size: usize,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            sample_rate: Context::DEFAULT_SAMPLE_RATE,
            buffer_size: Context::DEFAULT_BUFFER_SIZE,
        }
    }
}

impl SynthSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| FileOp::Read.error(path, e))?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Load the user's `plucked.toml`, or the defaults if there is none.
    ///
    /// A file that exists but cannot be parsed is an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = paths::settings_file();
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| FileOp::CreateDir.error(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| FileOp::Write.error(path, e))
    }

    /// Validate and convert into a synthesis context.
    pub fn context(&self) -> Result<Context, ConfigError> {
        validate_settings(self)?;
        Ok(Context::new(self.sample_rate, self.buffer_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_context() {
        let ctx = SynthSettings::default().context().unwrap();
        assert_eq!(ctx, Context::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings = SynthSettings::from_toml("sample_rate = 48000.0").unwrap();
        assert_eq!(settings.sample_rate, 48000.0);
        assert_eq!(settings.buffer_size, Context::DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("plucked.toml");
        let settings = SynthSettings {
            sample_rate: 22050.0,
            buffer_size: 64,
        };
        settings.save(&path).unwrap();
        assert_eq!(SynthSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn invalid_settings_do_not_make_a_context() {
        let settings = SynthSettings {
            sample_rate: 44100.0,
            buffer_size: 0,
        };
        assert!(matches!(settings.context(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            SynthSettings::from_toml("buffer_size = \"lots\""),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
