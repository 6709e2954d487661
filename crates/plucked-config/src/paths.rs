//! Platform-specific paths for presets and settings.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/plucked/presets/` (Linux), `~/Library/Application Support/plucked/presets/` (macOS), `%APPDATA%\plucked\presets\` (Windows)
//! - **Settings file**: `plucked.toml` in the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use plucked_config::paths;
//!
//! let presets_dir = paths::user_presets_dir();
//! println!("User presets: {:?}", presets_dir);
//!
//! if let Some(path) = paths::find_preset("my_pluck") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, FileOp};

/// Application name used for directory paths.
const APP_NAME: &str = "plucked";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// File name of the engine settings.
const SETTINGS_FILE: &str = "plucked.toml";

/// Returns the user-specific presets directory.
///
/// Falls back to `./plucked/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/plucked/`
/// - macOS: `~/Library/Application Support/plucked/`
/// - Windows: `%APPDATA%\plucked\`
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the settings file read by [`crate::SynthSettings::load_or_default`].
pub fn settings_file() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Find a preset file by name.
///
/// The name can be a path to an existing TOML file, or a preset name (with or
/// without `.toml`) looked up in the user presets directory.
///
/// # Example
///
/// ```rust,no_run
/// use plucked_config::paths::find_preset;
///
/// if let Some(path) = find_preset("soft_nylon") {
///     println!("Found: {:?}", path);
/// }
/// ```
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

pub(crate) fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Ensure the user presets directory exists, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    ensure_dir(user_presets_dir())
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| FileOp::CreateDir.error(&dir, e))?;
        tracing::debug!(path = %dir.display(), "created directory");
    }
    Ok(dir)
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List `.toml` files in a directory, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path.
///
/// # Example
///
/// ```rust
/// use plucked_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/soft_nylon.toml"));
/// assert_eq!(name, Some("soft_nylon".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
