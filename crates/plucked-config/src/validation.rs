//! Range checks for tone presets and synth settings.
//!
//! Validation runs before any stage is built, and reports every problem it
//! finds rather than stopping at the first.
//!
//! | Field | Accepted |
//! |-------|----------|
//! | `sample_rate` | 1000 to 384000 Hz |
//! | `buffer_size` | 1 to 1048576 samples |
//! | excitation `frequency` | 1 to 384000 Hz |
//! | excitation `length` | 1 to 4194304 samples |
//! | `cutoff`, `tone` | > 0 Hz |
//! | `decay` | (0, 1] |
//! | `level` | 0 to 10 |
//! | `duration` | (0, 600] seconds |
//! | formant `q` | > 1 |
//! | formant `gain` | -10 to 10 |
//!
//! # Example
//!
//! ```rust
//! use plucked_config::{ExcitationConfig, TonePreset, validate_preset};
//!
//! let preset = TonePreset::new("Test", ExcitationConfig::Saw { frequency: 110.0 });
//! validate_preset(&preset).expect("defaults are valid");
//! ```

use thiserror::Error;

use crate::preset::{ExcitationConfig, TonePreset};
use crate::settings::SynthSettings;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Preset name is empty or whitespace.
    #[error("preset name must not be empty")]
    EmptyName,

    /// Value outside its allowed range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the field.
        field: String,
        /// The rejected value.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Value must be finite and strictly positive.
    #[error("'{field}' must be a positive finite number, got {value}")]
    NotPositive {
        /// Name of the field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const SAMPLE_RATE_RANGE: (f64, f64) = (1000.0, 384_000.0);
const MAX_BUFFER_SIZE: usize = 1 << 20;
const MAX_LEVEL: f64 = 10.0;
const MAX_DURATION: f64 = 600.0;
const MAX_FORMANT_GAIN: f64 = 10.0;
/// One period at 1 Hz still fits a delay line at the highest sample rate.
const FREQUENCY_RANGE: (f64, f64) = (1.0, 384_000.0);
const MAX_NOISE_LENGTH: usize = plucked_core::DelayLine::MAX_LENGTH;

/// Collects errors so a caller sees all of them at once.
#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn positive(&mut self, field: &str, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            self.errors.push(ValidationError::NotPositive {
                field: field.to_string(),
                value,
            });
        }
    }

    fn range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        // NaN fails both comparisons, so test for inclusion
        if !(min..=max).contains(&value) {
            self.errors.push(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
    }

    fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}

/// Validate a tone preset's parameters.
///
/// Frequencies that depend on the sample rate (formant edges against Nyquist)
/// are checked again when the preset is built against a concrete context.
pub fn validate_preset(preset: &TonePreset) -> ValidationResult<()> {
    let mut check = Checker::default();

    if preset.name.trim().is_empty() {
        check.errors.push(ValidationError::EmptyName);
    }

    match preset.excitation {
        ExcitationConfig::Triangle { frequency } | ExcitationConfig::Saw { frequency } => {
            check.range(
                "excitation.frequency",
                frequency,
                FREQUENCY_RANGE.0,
                FREQUENCY_RANGE.1,
            );
        }
        ExcitationConfig::Noise { length, .. } => {
            if length == 0 || length > MAX_NOISE_LENGTH {
                check.errors.push(ValidationError::OutOfRange {
                    field: "excitation.length".to_string(),
                    value: length as f64,
                    min: 1.0,
                    max: MAX_NOISE_LENGTH as f64,
                });
            }
        }
    }

    check.positive("cutoff", preset.cutoff);
    check.positive("decay", preset.decay);
    if preset.decay.is_finite() && preset.decay > 0.0 {
        check.range("decay", preset.decay, 0.0, 1.0);
    }
    if let Some(tone) = preset.tone {
        check.positive("tone", tone);
    }
    check.range("level", preset.level, 0.0, MAX_LEVEL);
    check.positive("duration", preset.duration);
    if preset.duration.is_finite() && preset.duration > 0.0 {
        check.range("duration", preset.duration, 0.0, MAX_DURATION);
    }

    for (i, formant) in preset.formants.iter().enumerate() {
        check.positive(&format!("formants[{i}].centre"), formant.centre);
        if !(formant.q.is_finite() && formant.q > 1.0) {
            check.errors.push(ValidationError::OutOfRange {
                field: format!("formants[{i}].q"),
                value: formant.q,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        check.range(
            &format!("formants[{i}].gain"),
            formant.gain,
            -MAX_FORMANT_GAIN,
            MAX_FORMANT_GAIN,
        );
    }

    check.finish()
}

/// Validate synth settings.
pub fn validate_settings(settings: &SynthSettings) -> ValidationResult<()> {
    let mut check = Checker::default();
    check.range(
        "sample_rate",
        settings.sample_rate,
        SAMPLE_RATE_RANGE.0,
        SAMPLE_RATE_RANGE.1,
    );
    if settings.buffer_size == 0 || settings.buffer_size > MAX_BUFFER_SIZE {
        check.errors.push(ValidationError::OutOfRange {
            field: "buffer_size".to_string(),
            value: settings.buffer_size as f64,
            min: 1.0,
            max: MAX_BUFFER_SIZE as f64,
        });
    }
    check.finish()
}
