//! Karplus-Strong plucked-string tone.
//!
//! The tone is a feedback loop around a delay line:
//!
//! ```text
//!  excitation ──► (+) ──► fork ──────────────────────────► output
//!                  ▲        │
//!                  │        ▼
//!             feedback   delay(L) ──► RC low-pass ──► × decay
//!                  ▲                                     │
//!                  └──────────────── pipe ◄──────────────┘
//! ```
//!
//! Every trip round the loop takes `L` samples, so the tone repeats with period
//! `L / R` seconds and sounds at roughly `R / L` Hz. The low-pass removes a
//! little high-frequency energy per trip and the decay factor scales the whole
//! period down, giving the characteristic bright attack and mellow ring-out.
//!
//! The seeded zeros of the delay line are what let the loop start: the mixer can
//! read its first `L` feedback samples before anything has gone round.
//!
//! # Stability
//!
//! With `decay < 1` the output decays towards silence. `decay >= 1` is accepted
//! but grows without bound at low frequencies; a warning is logged.
//!
//! # Example
//!
//! ```rust
//! use plucked_core::{Context, karplus_strong_saw};
//!
//! let ctx = Context::new(8000.0, 64).unwrap();
//! let tone = karplus_strong_saw(&ctx, 100.0, 1000.0, 0.98).unwrap();
//! let samples: Vec<f64> = tone.truncate(&ctx, 800).unwrap().collect();
//! assert_eq!(samples.len(), 800);
//! ```

use crate::context::Context;
use crate::delay::DelayLine;
use crate::error::{Error, Result, positive};
use crate::excitation::Excitation;
use crate::filter::Pass;
use crate::stream::{Stream, channel};

/// Parameters of one plucked-string loop.
///
/// # Invariants
///
/// - `1 <= delay <= DelayLine::MAX_LENGTH`
/// - `cutoff` finite and positive
/// - `decay` finite and positive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KarplusStrong {
    /// Loop length in samples; sets the pitch.
    pub delay: usize,
    /// Damping low-pass corner in Hz; lower values darken the tone faster.
    pub cutoff: f64,
    /// Gain applied once per trip round the loop.
    pub decay: f64,
}

impl KarplusStrong {
    /// Checks every parameter without starting anything.
    pub fn validate(&self) -> Result<()> {
        DelayLine::check_length(self.delay)?;
        if !positive(self.cutoff) {
            return Err(Error::InvalidCutoff(self.cutoff));
        }
        if !positive(self.decay) {
            return Err(Error::InvalidDecay(self.decay));
        }
        Ok(())
    }

    /// Wires the loop around `excitation` and returns the tone.
    ///
    /// The result is endless; truncate it or drop it to wind the loop down.
    pub fn build(&self, ctx: &Context, excitation: Stream) -> Result<Stream> {
        self.validate()?;
        if self.decay >= 1.0 {
            tracing::warn!(decay = self.decay, "decay factor >= 1, tone will not die away");
        }
        tracing::debug!(
            delay = self.delay,
            cutoff = self.cutoff,
            decay = self.decay,
            "building karplus-strong loop"
        );

        let (inlet, feedback) = channel(ctx);
        let combined = excitation.add(ctx, feedback)?;
        let (output, copy) = combined.fork(ctx)?;
        let returned = copy
            .delay(ctx, self.delay)?
            .rc_filter(ctx, Pass::LowPass, self.cutoff)?
            .scale(ctx, self.decay)?;
        inlet.feed(returned)?;
        Ok(output)
    }
}

/// Builds a tone from an arbitrary excitation stream.
///
/// # Arguments
///
/// * `excitation` - Burst that starts the string; usually `delay` samples long
/// * `delay` - Loop length in samples
/// * `cutoff` - Damping low-pass corner in Hz
/// * `decay` - Per-trip gain, normally in (0, 1)
pub fn karplus_strong(
    ctx: &Context,
    excitation: Stream,
    delay: usize,
    cutoff: f64,
    decay: f64,
) -> Result<Stream> {
    KarplusStrong {
        delay,
        cutoff,
        decay,
    }
    .build(ctx, excitation)
}

/// Plucks a string with `excitation`, deriving the loop length from it.
///
/// All parameters are validated before the first stage starts.
pub fn pluck(ctx: &Context, excitation: &Excitation, cutoff: f64, decay: f64) -> Result<Stream> {
    let params = KarplusStrong {
        delay: excitation.delay_samples(ctx)?,
        cutoff,
        decay,
    };
    params.validate()?;
    tracing::debug!(kind = excitation.kind(), "plucking string");
    params.build(ctx, excitation.build(ctx)?)
}

/// Tone at `frequency` Hz excited by one period of a triangle wave.
pub fn karplus_strong_triangle(
    ctx: &Context,
    frequency: f64,
    cutoff: f64,
    decay: f64,
) -> Result<Stream> {
    pluck(ctx, &Excitation::Triangle { frequency }, cutoff, decay)
}

/// Tone at `frequency` Hz excited by one period of a sawtooth.
pub fn karplus_strong_saw(ctx: &Context, frequency: f64, cutoff: f64, decay: f64) -> Result<Stream> {
    pluck(ctx, &Excitation::Saw { frequency }, cutoff, decay)
}

/// Tone excited by `length` samples of noise from `seed`; pitch is `R / length`.
pub fn karplus_strong_noise(
    ctx: &Context,
    seed: u64,
    length: usize,
    cutoff: f64,
    decay: f64,
) -> Result<Stream> {
    pluck(ctx, &Excitation::Noise { seed, length }, cutoff, decay)
}
