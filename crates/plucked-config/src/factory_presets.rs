//! Factory presets bundled with the library.
//!
//! These are embedded at compile time and always available without external
//! files. Each one is a starting point for a different kind of string.

use crate::TonePreset;

/// TOML content for factory presets, keyed by identifier.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("demo_saw", DEMO_SAW_PRESET),
    ("nylon", NYLON_PRESET),
    ("steel", STEEL_PRESET),
    ("bass", BASS_PRESET),
    ("vowel_ah", VOWEL_AH_PRESET),
];

/// The reference tone: a 100 Hz sawtooth pluck, darkened and turned down.
const DEMO_SAW_PRESET: &str = r#"
name = "Demo Saw"
description = "Sawtooth pluck at 100 Hz through a 300 Hz tone control"
cutoff = 1000.0
decay = 0.98
tone = 300.0
level = 0.1
duration = 1.5

[excitation]
kind = "saw"
frequency = 100.0
"#;

/// Soft triangle pluck with a quick high-frequency roll-off.
const NYLON_PRESET: &str = r#"
name = "Nylon"
description = "Mellow triangle pluck, fast treble decay"
cutoff = 1500.0
decay = 0.99
level = 0.5
duration = 2.0

[excitation]
kind = "triangle"
frequency = 196.0
"#;

/// Bright noise burst, the classic Karplus-Strong sound.
const STEEL_PRESET: &str = r#"
name = "Steel"
description = "Bright noise-excited string with a long ring"
cutoff = 6000.0
decay = 0.995
level = 0.4
duration = 3.0

[excitation]
kind = "noise"
seed = 1
length = 134
"#;

/// Low triangle pluck.
const BASS_PRESET: &str = r#"
name = "Bass"
description = "Low triangle pluck with a short, round decay"
cutoff = 600.0
decay = 0.97
level = 0.8
duration = 1.0

[excitation]
kind = "triangle"
frequency = 55.0
"#;

/// Sawtooth string through three vowel formants.
const VOWEL_AH_PRESET: &str = r#"
name = "Vowel Ah"
description = "Sawtooth string shaped by the first three formants of 'ah'"
cutoff = 3000.0
decay = 0.99
level = 0.2
duration = 2.0

[excitation]
kind = "saw"
frequency = 110.0

[[formants]]
centre = 730.0
q = 3.0
gain = 3.0

[[formants]]
centre = 1090.0
q = 3.5
gain = 2.0

[[formants]]
centre = 2440.0
q = 3.5
gain = 1.5
"#;

/// Get all factory presets.
///
/// A factory preset that fails to parse is skipped.
pub fn factory_presets() -> Vec<TonePreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| TonePreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use plucked_config::get_factory_preset;
///
/// let preset = get_factory_preset("demo_saw").expect("bundled");
/// assert_eq!(preset.name, "Demo Saw");
/// assert!(get_factory_preset("VOWEL AH").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<TonePreset> {
    let name_lower = name.to_lowercase();

    for (id, toml) in FACTORY_PRESETS_TOML {
        if id.to_lowercase() == name_lower {
            return TonePreset::from_toml(toml).ok();
        }
    }

    // Also try matching against the preset's actual name field
    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory preset.
///
/// # Example
///
/// ```rust
/// use plucked_config::is_factory_preset;
///
/// assert!(is_factory_preset("nylon"));
/// assert!(is_factory_preset("Demo Saw"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
