//! Waveform generators: triangle, sawtooth, and seeded noise.
//!
//! The periodic shapes are naive (not band-limited). They seed a resonator with
//! a single period, where the damping filter removes the aliasing anyway.

use crate::context::Context;
use crate::error::{Error, Result, positive};
use crate::stream::{Sample, Stream, source};

/// Periodic waveform shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    /// Starts at -1, peaks at +1 half way through the period.
    Triangle,
    /// Ramps from -1 towards +1, then wraps.
    Saw,
}

impl Waveform {
    /// Value at normalized `phase` in [0.0, 1.0).
    #[inline]
    pub fn at(self, phase: f64) -> Sample {
        match self {
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// Phase-accumulating oscillator with a fixed frequency.
///
/// # Example
///
/// ```rust
/// use plucked_core::{Oscillator, Waveform};
///
/// let mut osc = Oscillator::new(Waveform::Saw, 4.0, 16.0).unwrap();
/// let period: Vec<f64> = osc.by_ref().take(4).collect();
/// assert_eq!(period, vec![-1.0, -0.5, 0.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Current phase position [0.0, 1.0)
    phase: f64,
    /// Phase increment per sample
    phase_inc: f64,
    waveform: Waveform,
}

impl Oscillator {
    /// Creates an oscillator at phase 0.
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Result<Self> {
        if !positive(frequency) {
            return Err(Error::InvalidFrequency(frequency));
        }
        if !positive(sample_rate) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            phase: 0.0,
            phase_inc: frequency / sample_rate,
            waveform,
        })
    }

    /// Generates the next sample.
    #[inline]
    pub fn advance(&mut self) -> Sample {
        let output = self.waveform.at(self.phase);
        self.phase += self.phase_inc;
        self.phase -= self.phase.floor();
        output
    }
}

impl Iterator for Oscillator {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.advance())
    }
}

/// Deterministic white noise in [-1.0, 1.0].
///
/// The seed is scrambled with SplitMix64 and then drives a xorshift64
/// generator, so neighbouring seeds give unrelated sequences and the same seed
/// always gives the same bits.
#[derive(Debug, Clone)]
pub struct Noise {
    state: u64,
}

impl Noise {
    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        let state = splitmix64(seed);
        // xorshift has a fixed point at zero
        Self {
            state: if state == 0 { 0x9E37_79B9_7F4A_7C15 } else { state },
        }
    }

    /// Generates the next sample.
    #[inline]
    pub fn advance(&mut self) -> Sample {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;

        (x as i64 as f64) / (i64::MAX as f64)
    }
}

impl Iterator for Noise {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.advance())
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Infinite triangle wave at `frequency` Hz.
pub fn triangle(ctx: &Context, frequency: f64) -> Result<Stream> {
    let osc = Oscillator::new(Waveform::Triangle, frequency, ctx.sample_rate())?;
    source(ctx, "triangle", osc)
}

/// Infinite sawtooth wave at `frequency` Hz.
pub fn saw(ctx: &Context, frequency: f64) -> Result<Stream> {
    let osc = Oscillator::new(Waveform::Saw, frequency, ctx.sample_rate())?;
    source(ctx, "saw", osc)
}

/// Infinite seeded noise.
pub fn noise(ctx: &Context, seed: u64) -> Result<Stream> {
    source(ctx, "noise", Noise::new(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_shape() {
        let mut osc = Oscillator::new(Waveform::Triangle, 1.0, 8.0).unwrap();
        let period: Vec<_> = osc.by_ref().take(8).collect();
        assert_eq!(period, vec![-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5]);
        // Wraps back to the start of the period
        assert_eq!(osc.advance(), -1.0);
    }

    #[test]
    fn saw_shape() {
        let period: Vec<_> = Oscillator::new(Waveform::Saw, 1.0, 4.0)
            .unwrap()
            .take(5)
            .collect();
        assert_eq!(period, vec![-1.0, -0.5, 0.0, 0.5, -1.0]);
    }

    #[test]
    fn oscillator_rejects_bad_frequency() {
        assert!(matches!(
            Oscillator::new(Waveform::Saw, 0.0, 48000.0),
            Err(Error::InvalidFrequency(_))
        ));
        assert!(matches!(
            Oscillator::new(Waveform::Triangle, f64::NAN, 48000.0),
            Err(Error::InvalidFrequency(_))
        ));
    }

    #[test]
    fn noise_in_range() {
        let mut noise = Noise::new(7);
        for _ in 0..10_000 {
            let s = noise.advance();
            assert!((-1.0..=1.0).contains(&s), "noise out of range: {s}");
        }
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let a: Vec<_> = Noise::new(42).take(256).collect();
        let b: Vec<_> = Noise::new(42).take(256).collect();
        let c: Vec<_> = Noise::new(43).take(256).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn noise_seed_zero_is_not_stuck() {
        let samples: Vec<_> = Noise::new(0).take(16).collect();
        assert!(samples.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn noise_is_roughly_zero_mean() {
        let n = 50_000;
        let mean: f64 = Noise::new(1234).take(n).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.02, "mean = {mean}");
    }

    #[test]
    fn generator_streams() {
        let ctx = Context::new(8.0, 4).unwrap();
        let tri: Vec<_> = triangle(&ctx, 1.0).unwrap().take(4).collect();
        assert_eq!(tri, vec![-1.0, -0.5, 0.0, 0.5]);
        let sw: Vec<_> = saw(&ctx, 2.0).unwrap().take(4).collect();
        assert_eq!(sw, vec![-1.0, -0.5, 0.0, 0.5]);
        let nz: Vec<_> = noise(&ctx, 9).unwrap().take(4).collect();
        assert_eq!(nz, Noise::new(9).take(4).collect::<Vec<_>>());
    }
}
