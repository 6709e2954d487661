//! Formant shaping: boost or cut one frequency band of a stream.
//!
//! The input is forked; one copy is band-limited with a two-pole Chebyshev
//! high-pass and low-pass, scaled by `gain - 1`, and mixed back into the other:
//!
//! ```text
//! y = x + (gain - 1) · bandpass(x)
//! ```
//!
//! A gain of 1 leaves the signal unchanged, above 1 boosts the band, below 1
//! cuts it.
//!
//! The band edges are derived from the centre frequency and Q, divided by
//! empirical factors that compensate for the corner shift of the cascaded
//! sections:
//!
//! ```text
//! lower = (centre - centre / Q) / 0.772
//! upper = (centre + centre / Q) / 1.29
//! ```
//!
//! The edges cross once Q exceeds about 3.98. The high-pass corner then sits
//! above the low-pass corner and the band passes very little.

use crate::context::Context;
use crate::error::{Error, Result, positive};
use crate::stream::Stream;

/// Passband ripple of the band filters, in percent.
pub const FORMANT_RIPPLE: f64 = 0.5;

/// Pole count of each band filter.
pub const FORMANT_POLES: usize = 2;

const LOWER_CORRECTION: f64 = 0.772;
const UPPER_CORRECTION: f64 = 1.29;

/// One resonant band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormantBand {
    /// Centre frequency in Hz.
    pub centre: f64,
    /// Quality factor; higher is narrower.
    pub q: f64,
    /// Linear gain applied to the band. Negative values invert it.
    pub gain: f64,
}

impl FormantBand {
    /// Lower and upper band edges in Hz.
    pub fn cutoffs(&self) -> (f64, f64) {
        let spread = self.centre / self.q;
        (
            (self.centre - spread) / LOWER_CORRECTION,
            (self.centre + spread) / UPPER_CORRECTION,
        )
    }

    /// Checks the band against the context before anything is built.
    pub fn validate(&self, ctx: &Context) -> Result<()> {
        if !positive(self.centre) {
            return Err(Error::InvalidFrequency(self.centre));
        }
        if !positive(self.q) {
            return Err(Error::InvalidQ(self.q));
        }
        if !self.gain.is_finite() {
            return Err(Error::InvalidGain(self.gain));
        }
        let (lower, upper) = self.cutoffs();
        for cutoff in [lower, upper] {
            if !positive(cutoff) {
                return Err(Error::InvalidCutoff(cutoff));
            }
            if cutoff >= ctx.nyquist() {
                return Err(Error::CutoffAboveNyquist {
                    cutoff,
                    nyquist: ctx.nyquist(),
                });
            }
        }
        Ok(())
    }
}

impl Stream {
    /// Boosts or cuts `band` in this stream.
    ///
    /// # Errors
    ///
    /// Any invalid band parameter is reported before a stage starts. A Q of 1
    /// or less puts the lower edge at or below 0 Hz and is rejected as an
    /// invalid cutoff.
    pub fn formant(self, ctx: &Context, band: FormantBand) -> Result<Stream> {
        band.validate(ctx)?;
        let (lower, upper) = band.cutoffs();
        tracing::debug!(centre = band.centre, q = band.q, gain = band.gain, lower, upper, "formant band");

        let (dry, copy) = self.fork(ctx)?;
        let wet = copy
            .chebyshev_band_pass(ctx, lower, upper, FORMANT_RIPPLE, FORMANT_POLES)?
            .scale(ctx, band.gain - 1.0)?;
        dry.add(ctx, wet)
    }
}
