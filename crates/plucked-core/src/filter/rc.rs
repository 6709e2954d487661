//! First-order RC filter, the loop damping element of a plucked string.
//!
//! Discretized analog RC network with `rc = 1 / (2π·fc)` and `dt = 1 / fs`:
//!
//! ```text
//! low-pass:  y[n] = y[n-1] + α·(x[n] - y[n-1])          α = dt / (rc + dt)
//! high-pass: y[n] = α·(y[n-1] + x[n] - x[n-1])          α = rc / (rc + dt)
//! ```
//!
//! 6 dB/octave, zero latency, one multiply per sample. The low-pass is a convex
//! blend of input and previous output, so it never overshoots its input.
//!
//! # Usage
//!
//! ```rust
//! use plucked_core::{Filter, Pass, RcFilter};
//!
//! let mut lp = RcFilter::new(Pass::LowPass, 1000.0, 44100.0).unwrap();
//! let filtered = lp.process(1.0);
//! assert!(filtered > 0.0 && filtered < 1.0);
//! ```

use core::f64::consts::TAU;

use super::{Filter, Pass};
use crate::error::{Error, Result, positive};
use crate::stream::Sample;

/// One-pole RC low- or high-pass.
///
/// # Invariants
///
/// - `alpha` is in (0, 1), so the recursion is stable
/// - Cutoffs above Nyquist are accepted; the low-pass then tends to a pass-through
#[derive(Debug, Clone)]
pub struct RcFilter {
    pass: Pass,
    alpha: f64,
    /// Previous output
    y1: f64,
    /// Previous input (high-pass only)
    x1: f64,
}

impl RcFilter {
    /// Creates a filter.
    ///
    /// # Arguments
    ///
    /// * `pass` - Low- or high-pass
    /// * `cutoff` - Corner frequency in Hz, finite and positive
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(pass: Pass, cutoff: f64, sample_rate: f64) -> Result<Self> {
        if !positive(cutoff) {
            return Err(Error::InvalidCutoff(cutoff));
        }
        if !positive(sample_rate) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        let rc = 1.0 / (TAU * cutoff);
        let dt = 1.0 / sample_rate;
        let alpha = match pass {
            Pass::LowPass => dt / (rc + dt),
            Pass::HighPass => rc / (rc + dt),
        };
        Ok(Self {
            pass,
            alpha,
            y1: 0.0,
            x1: 0.0,
        })
    }

    /// Smoothing coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Filter for RcFilter {
    #[inline]
    fn process(&mut self, input: Sample) -> Sample {
        let output = match self.pass {
            Pass::LowPass => self.y1 + self.alpha * (input - self.y1),
            Pass::HighPass => self.alpha * (self.y1 + input - self.x1),
        };
        self.x1 = input;
        self.y1 = output;
        output
    }

    fn reset(&mut self) {
        self.y1 = 0.0;
        self.x1 = 0.0;
    }
}
