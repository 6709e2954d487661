//! Finite bursts that set a string ringing.
//!
//! An excitation is exactly one loop length of signal: one period of an
//! oscillator at the target pitch, or `length` samples of seeded noise. The
//! stream is truncated, never exhausted, so the feedback loop always sees a
//! finite excitation next to its own endless output.

use crate::context::Context;
use crate::delay::DelayLine;
use crate::error::{Error, Result};
use crate::generator::{noise, saw, triangle};
use crate::stream::Stream;

/// The signal used to pluck a string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Excitation {
    /// One period of a triangle wave at `frequency` Hz.
    Triangle {
        /// Target pitch in Hz.
        frequency: f64,
    },
    /// One period of a sawtooth at `frequency` Hz.
    Saw {
        /// Target pitch in Hz.
        frequency: f64,
    },
    /// A burst of `length` samples of seeded white noise.
    Noise {
        /// Generator seed; the same seed always gives the same burst.
        seed: u64,
        /// Burst length in samples, which is also the loop length.
        length: usize,
    },
}

impl Excitation {
    /// Number of samples in the burst, and the delay length of the string it
    /// excites: `floor(R / f)` for the oscillators, `length` for noise.
    pub fn delay_samples(&self, ctx: &Context) -> Result<usize> {
        match *self {
            Excitation::Triangle { frequency } | Excitation::Saw { frequency } => {
                ctx.delay_for_frequency(frequency)
            }
            Excitation::Noise { length: 0, .. } => Err(Error::EmptyExcitation),
            Excitation::Noise { length, .. } => {
                DelayLine::check_length(length)?;
                Ok(length)
            }
        }
    }

    /// Starts the generator and truncates it to [`delay_samples`](Self::delay_samples).
    pub fn build(&self, ctx: &Context) -> Result<Stream> {
        let length = self.delay_samples(ctx)?;
        let generator = match *self {
            Excitation::Triangle { frequency } => triangle(ctx, frequency)?,
            Excitation::Saw { frequency } => saw(ctx, frequency)?,
            Excitation::Noise { seed, .. } => noise(ctx, seed)?,
        };
        generator.truncate(ctx, length)
    }

    /// Short lowercase name, for logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Excitation::Triangle { .. } => "triangle",
            Excitation::Saw { .. } => "saw",
            Excitation::Noise { .. } => "noise",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Noise;

    fn ctx() -> Context {
        Context::new(8000.0, 8).unwrap()
    }

    #[test]
    fn oscillator_bursts_last_one_period() {
        let ctx = ctx();
        let tri: Vec<_> = Excitation::Triangle { frequency: 1000.0 }
            .build(&ctx)
            .unwrap()
            .collect();
        assert_eq!(tri, vec![-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5]);

        let saw: Vec<_> = Excitation::Saw { frequency: 2000.0 }
            .build(&ctx)
            .unwrap()
            .collect();
        assert_eq!(saw, vec![-1.0, -0.5, 0.0, 0.5]);
    }

    #[test]
    fn period_rounds_down() {
        let ctx = ctx();
        // 8000 / 3000 = 2.67
        let e = Excitation::Saw { frequency: 3000.0 };
        assert_eq!(e.delay_samples(&ctx).unwrap(), 2);
        assert_eq!(e.build(&ctx).unwrap().count(), 2);
    }

    #[test]
    fn noise_burst_is_reproducible() {
        let ctx = ctx();
        let e = Excitation::Noise { seed: 5, length: 100 };
        let a: Vec<_> = e.build(&ctx).unwrap().collect();
        let b: Vec<_> = e.build(&ctx).unwrap().collect();
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);
        assert_eq!(a, Noise::new(5).take(100).collect::<Vec<_>>());
    }

    #[test]
    fn empty_noise_burst_is_rejected() {
        let e = Excitation::Noise { seed: 1, length: 0 };
        assert!(matches!(e.build(&ctx()), Err(Error::EmptyExcitation)));
    }

    #[test]
    fn frequency_above_sample_rate_is_rejected() {
        let e = Excitation::Triangle { frequency: 9000.0 };
        assert!(matches!(
            e.delay_samples(&ctx()),
            Err(Error::FrequencyTooHigh { .. })
        ));
    }
}
