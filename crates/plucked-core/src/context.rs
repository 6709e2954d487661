//! Synthesis context shared by every stage constructor.
//!
//! A [`Context`] carries the sample rate and the capacity of every stream edge.
//! It is validated once at construction and immutable afterwards, so it is passed
//! by reference into every constructor instead of living in a global.
//!
//! # Example
//!
//! ```rust
//! use plucked_core::Context;
//! use std::time::Duration;
//!
//! let ctx = Context::new(44100.0, 512).unwrap();
//! assert_eq!(ctx.samples_for(Duration::from_millis(500)), 22050);
//! assert_eq!(ctx.delay_for_frequency(441.0).unwrap(), 100);
//! ```

use std::time::Duration;

use crate::error::{Error, Result, positive};
use crate::delay::DelayLine;

/// Immutable synthesis configuration.
///
/// # Invariants
///
/// - `sample_rate` is finite and positive
/// - `buffer_size` is at least 1, so no edge is a rendezvous channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    sample_rate: f64,
    buffer_size: usize,
}

impl Context {
    /// Sample rate used by [`Context::default`].
    pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

    /// Edge capacity used by [`Context::default`].
    pub const DEFAULT_BUFFER_SIZE: usize = 1024;

    /// Creates a validated context.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Samples per second
    /// * `buffer_size` - Samples that may queue on one edge before the producer blocks
    pub fn new(sample_rate: f64, buffer_size: usize) -> Result<Self> {
        if !positive(sample_rate) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        if buffer_size == 0 {
            return Err(Error::ZeroBufferSize);
        }
        Ok(Self {
            sample_rate,
            buffer_size,
        })
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Capacity of each stream edge in samples.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate * 0.5
    }

    /// Number of whole samples that fit in `duration` (rounded down).
    pub fn samples_for(&self, duration: Duration) -> usize {
        (duration.as_secs_f64() * self.sample_rate).floor() as usize
    }

    /// Delay length in samples for one period of `frequency`, rounded down.
    ///
    /// This sets the pitch of a Karplus-Strong tone: the loop repeats every
    /// `floor(R / f)` samples.
    pub fn delay_for_frequency(&self, frequency: f64) -> Result<usize> {
        if !positive(frequency) {
            return Err(Error::InvalidFrequency(frequency));
        }
        let period = (self.sample_rate / frequency).floor();
        if period < 1.0 {
            return Err(Error::FrequencyTooHigh {
                frequency,
                sample_rate: self.sample_rate,
            });
        }
        if period > DelayLine::MAX_LENGTH as f64 {
            return Err(Error::FrequencyTooLow {
                frequency,
                sample_rate: self.sample_rate,
                max: DelayLine::MAX_LENGTH,
            });
        }
        Ok(period as usize)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_sample_rates() {
        assert!(matches!(
            Context::new(0.0, 16),
            Err(Error::InvalidSampleRate(_))
        ));
        assert!(matches!(
            Context::new(f64::NAN, 16),
            Err(Error::InvalidSampleRate(_))
        ));
        assert!(matches!(
            Context::new(-48000.0, 16),
            Err(Error::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn rejects_zero_buffer() {
        assert!(matches!(
            Context::new(48000.0, 0),
            Err(Error::ZeroBufferSize)
        ));
    }

    #[test]
    fn default_is_valid() {
        let ctx = Context::default();
        assert_eq!(ctx.sample_rate(), 44100.0);
        assert_eq!(ctx.buffer_size(), 1024);
        assert_eq!(ctx.nyquist(), 22050.0);
    }

    #[test]
    fn duration_rounds_down() {
        let ctx = Context::new(44100.0, 8).unwrap();
        assert_eq!(ctx.samples_for(Duration::from_secs(1)), 44100);
        assert_eq!(ctx.samples_for(Duration::from_millis(1500)), 66150);
        // 0.1 ms at 44.1 kHz is 4.41 samples
        assert_eq!(ctx.samples_for(Duration::from_micros(100)), 4);
        assert_eq!(ctx.samples_for(Duration::ZERO), 0);
    }

    #[test]
    fn delay_for_frequency() {
        let ctx = Context::new(44100.0, 8).unwrap();
        assert_eq!(ctx.delay_for_frequency(100.0).unwrap(), 441);
        assert_eq!(ctx.delay_for_frequency(441.0).unwrap(), 100);
        // 44100 / 440 = 100.227...
        assert_eq!(ctx.delay_for_frequency(440.0).unwrap(), 100);
    }

    #[test]
    fn delay_for_frequency_rejects_invalid() {
        let ctx = Context::new(44100.0, 8).unwrap();
        assert!(matches!(
            ctx.delay_for_frequency(0.0),
            Err(Error::InvalidFrequency(_))
        ));
        assert!(matches!(
            ctx.delay_for_frequency(50000.0),
            Err(Error::FrequencyTooHigh { .. })
        ));
    }

    #[test]
    fn delay_for_frequency_rejects_periods_longer_than_a_line() {
        let ctx = Context::new(44100.0, 8).unwrap();
        for frequency in [1e-15, 1e-300, f64::MIN_POSITIVE] {
            assert!(
                matches!(
                    ctx.delay_for_frequency(frequency),
                    Err(Error::FrequencyTooLow { max: DelayLine::MAX_LENGTH, .. })
                ),
                "{frequency}"
            );
        }
        // Just inside the limit
        let low = 44100.0 / (DelayLine::MAX_LENGTH as f64 - 0.5);
        assert_eq!(ctx.delay_for_frequency(low).unwrap(), DelayLine::MAX_LENGTH - 1);
    }
}
