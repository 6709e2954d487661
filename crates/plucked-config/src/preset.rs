//! Tone preset file format and rendering.

use std::path::Path;
use std::time::Duration;

use plucked_core::{Context, Excitation, FormantBand, Pass, Stream, pluck};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FileOp};
use crate::factory_presets::get_factory_preset;
use crate::paths;
use crate::validation::validate_preset;

/// How the string is plucked.
///
/// Serialized with a `kind` tag:
///
/// ```toml
/// [excitation]
/// kind = "noise"
/// seed = 42
/// length = 200
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExcitationConfig {
    /// One period of a triangle wave.
    Triangle {
        /// Pitch in Hz.
        frequency: f64,
    },
    /// One period of a sawtooth.
    Saw {
        /// Pitch in Hz.
        frequency: f64,
    },
    /// A burst of seeded noise; the pitch is `sample_rate / length`.
    Noise {
        /// Generator seed. TOML integers are signed, so seeds above
        /// `i64::MAX` cannot be written to a file.
        seed: u64,
        /// Burst length in samples.
        length: usize,
    },
}

impl From<ExcitationConfig> for Excitation {
    fn from(config: ExcitationConfig) -> Self {
        match config {
            ExcitationConfig::Triangle { frequency } => Excitation::Triangle { frequency },
            ExcitationConfig::Saw { frequency } => Excitation::Saw { frequency },
            ExcitationConfig::Noise { seed, length } => Excitation::Noise { seed, length },
        }
    }
}

/// One formant band applied after the string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FormantConfig {
    /// Centre frequency in Hz.
    pub centre: f64,
    /// Quality factor.
    pub q: f64,
    /// Band gain; 1.0 is neutral.
    pub gain: f64,
}

impl From<FormantConfig> for FormantBand {
    fn from(config: FormantConfig) -> Self {
        FormantBand {
            centre: config.centre,
            q: config.q,
            gain: config.gain,
        }
    }
}

/// A complete plucked tone: string parameters plus the shaping after it.
///
/// The rendered signal chain is
///
/// ```text
/// string ──► [tone low-pass] ──► formant 1 ──► … ──► × level ──► duration
/// ```
///
/// # TOML Format
///
/// ```toml
/// name = "Demo Saw"
/// description = "Sawtooth pluck through a dark tone control"
/// cutoff = 1000.0
/// decay = 0.98
/// tone = 300.0
/// level = 0.1
/// duration = 1.5
///
/// [excitation]
/// kind = "saw"
/// frequency = 100.0
///
/// [[formants]]
/// centre = 700.0
/// q = 3.0
/// gain = 2.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TonePreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Damping filter cutoff inside the loop, in Hz.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    /// Loop gain per period.
    #[serde(default = "default_decay")]
    pub decay: f64,

    /// Optional RC low-pass after the string, in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<f64>,

    /// Output gain.
    #[serde(default = "default_level")]
    pub level: f64,

    /// Rendered length in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Excitation burst.
    pub excitation: ExcitationConfig,

    /// Formant bands, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formants: Vec<FormantConfig>,
}

fn default_cutoff() -> f64 {
    1000.0
}

fn default_decay() -> f64 {
    0.98
}

fn default_level() -> f64 {
    1.0
}

fn default_duration() -> f64 {
    1.5
}

impl TonePreset {
    /// Create a preset with default string and output parameters.
    pub fn new(name: impl Into<String>, excitation: ExcitationConfig) -> Self {
        Self {
            name: name.into(),
            description: None,
            cutoff: default_cutoff(),
            decay: default_decay(),
            tone: None,
            level: default_level(),
            duration: default_duration(),
            excitation,
            formants: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the loop damping cutoff and decay.
    pub fn with_string(mut self, cutoff: f64, decay: f64) -> Self {
        self.cutoff = cutoff;
        self.decay = decay;
        self
    }

    /// Add a tone low-pass after the string.
    pub fn with_tone(mut self, cutoff: f64) -> Self {
        self.tone = Some(cutoff);
        self
    }

    /// Append a formant band.
    pub fn with_formant(mut self, centre: f64, q: f64, gain: f64) -> Self {
        self.formants.push(FormantConfig { centre, q, gain });
        self
    }

    /// Set the output level.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Set the rendered length in seconds.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| FileOp::Read.error(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Resolve a preset by factory id or name, file path, or user preset name.
    ///
    /// Factory presets win over user presets of the same name.
    pub fn resolve(name: &str) -> Result<Self, ConfigError> {
        Self::resolve_in(name, &paths::user_presets_dir())
    }

    fn resolve_in(name: &str, user_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(preset) = get_factory_preset(name) {
            return Ok(preset);
        }
        match paths::find_preset_in(name, user_dir) {
            Some(path) => Self::load(path),
            None => Err(ConfigError::PresetNotFound {
                name: name.to_string(),
                searched: user_dir.to_path_buf(),
            }),
        }
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| FileOp::CreateDir.error(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| FileOp::Write.error(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the preset's parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_preset(self)?;
        Ok(())
    }

    /// Rendered length in whole samples at the context's rate.
    pub fn sample_count(&self, ctx: &Context) -> usize {
        ctx.samples_for(Duration::try_from_secs_f64(self.duration).unwrap_or(Duration::ZERO))
    }

    /// Build the full signal chain and return the finite output stream.
    ///
    /// Everything is checked against `ctx` before the first stage starts, so an
    /// invalid preset leaves no threads behind.
    pub fn build(&self, ctx: &Context) -> Result<Stream, ConfigError> {
        self.validate()?;
        let excitation = Excitation::from(self.excitation);
        excitation.delay_samples(ctx)?;
        let bands: Vec<FormantBand> = self.formants.iter().copied().map(Into::into).collect();
        for band in &bands {
            band.validate(ctx)?;
        }

        tracing::debug!(
            name = %self.name,
            kind = excitation.kind(),
            formants = bands.len(),
            duration = self.duration,
            "building preset"
        );

        let mut stream = pluck(ctx, &excitation, self.cutoff, self.decay)?;
        if let Some(tone) = self.tone {
            stream = stream.rc_filter(ctx, Pass::LowPass, tone)?;
        }
        for band in bands {
            stream = stream.formant(ctx, band)?;
        }
        Ok(stream
            .scale(ctx, self.level)?
            .truncate(ctx, self.sample_count(ctx))?)
    }
}
