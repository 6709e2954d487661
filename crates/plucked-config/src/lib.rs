//! Settings and tone presets for plucked string synthesis.
//!
//! This crate sits on top of `plucked-core` and turns TOML files into running
//! stream graphs.
//!
//! # Features
//!
//! - **Settings**: Sample rate and buffer size, loaded from `plucked.toml`
//! - **Tone Presets**: Excitation, string, tone control, formants and output level
//! - **Validation**: Range checks that report every problem at once
//! - **Paths**: Platform-specific preset and config directories
//! - **Factory Presets**: Built-in tones, always available
//!
//! # Example
//!
//! ```rust,no_run
//! use plucked_config::{ExcitationConfig, SynthSettings, TonePreset, user_presets_dir};
//!
//! let ctx = SynthSettings::load_or_default().unwrap().context().unwrap();
//!
//! let preset = TonePreset::new("Bright", ExcitationConfig::Noise { seed: 7, length: 100 })
//!     .with_string(4000.0, 0.995)
//!     .with_formant(800.0, 3.0, 2.0)
//!     .with_level(0.5);
//!
//! let samples: Vec<f64> = preset.build(&ctx).unwrap().collect();
//! println!("rendered {} samples", samples.len());
//!
//! preset.save(user_presets_dir().join("bright.toml")).unwrap();
//! ```

mod error;
mod preset;
mod settings;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Preset and settings validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::{ConfigError, FileOp};
pub use factory_presets::{
    factory_preset_names, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_presets_in_dir,
    list_user_presets, preset_name_from_path, settings_file, user_config_dir, user_presets_dir,
};
pub use preset::{ExcitationConfig, FormantConfig, TonePreset};
pub use settings::SynthSettings;
pub use validation::{ValidationError, ValidationResult, validate_preset, validate_settings};
