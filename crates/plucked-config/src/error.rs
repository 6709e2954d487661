//! Errors from loading, saving and building presets and settings.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// File system operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a preset or settings file
    Read,
    /// Writing a preset or settings file
    Write,
    /// Creating a config or presets directory
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors raised by this crate.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file or directory could not be accessed.
    #[error("cannot {op} '{}': {source}", path.display())]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset file is not valid TOML or does not match the preset layout.
    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A preset or settings value could not be written as TOML.
    #[error("cannot encode TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory preset, file path or user preset matched the name.
    #[error("preset '{name}' not found among factory presets or in '{}'", searched.display())]
    PresetNotFound {
        /// Name as given by the caller.
        name: String,
        /// User presets directory that was searched.
        searched: PathBuf,
    },

    /// A preset or settings value is out of range.
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// The synthesis graph refused the parameters or could not start.
    #[error("synthesis error: {0}")]
    Synth(#[from] plucked_core::Error),
}

impl FileOp {
    /// Wraps an I/O failure on `path`.
    pub fn error(self, path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            op: self,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;

    fn not_found() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn io_errors_name_the_operation_and_path() {
        let err = FileOp::Read.error("/some/path", not_found());
        assert!(matches!(
            err,
            ConfigError::Io { op: FileOp::Read, ref path, .. } if path == std::path::Path::new("/some/path")
        ));
        assert!(err.source().is_some(), "Io must expose its source");

        let msg = FileOp::Write.error("/a/b.toml", not_found()).to_string();
        assert!(msg.starts_with("cannot write '/a/b.toml'"), "got: {msg}");

        let msg = FileOp::CreateDir.error("/a/b", not_found()).to_string();
        assert!(msg.starts_with("cannot create directory"), "got: {msg}");
    }

    #[test]
    fn preset_not_found_names_the_search_directory() {
        let err = ConfigError::PresetNotFound {
            name: "nylon2".to_string(),
            searched: PathBuf::from("/cfg/plucked/presets"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'nylon2' not found"), "got: {msg}");
        assert!(msg.contains("/cfg/plucked/presets"), "got: {msg}");
        assert!(err.source().is_none());
    }

    #[test]
    fn synth_error_converts_and_chains() {
        let err: ConfigError = plucked_core::Error::ZeroDelay.into();
        assert!(matches!(err, ConfigError::Synth(plucked_core::Error::ZeroDelay)));
        assert!(err.to_string().contains("delay length"));
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_error_converts() {
        let err: ConfigError = ValidationError::EmptyName.into();
        assert!(err.to_string().starts_with("validation failed"));
    }
}
