//! Recursive filters and their stream adaptors.
//!
//! | Filter | Order | Slope | Used for |
//! |--------|-------|-------|----------|
//! | [`RcFilter`] | 1 | 6 dB/oct | loop damping, tone control |
//! | [`Chebyshev`] | 2..=20 | steep, passband ripple | formant bands |
//!
//! Both are plain per-sample processors implementing [`Filter`]. The methods on
//! [`Stream`] wrap them in a stage.

mod chebyshev;
mod rc;

pub use chebyshev::Chebyshev;
pub use rc::RcFilter;

use crate::context::Context;
use crate::error::Result;
use crate::stream::{Sample, Stream, source};

/// Which side of the cutoff a filter keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pass {
    /// Keep frequencies below the cutoff.
    #[default]
    LowPass,
    /// Keep frequencies above the cutoff.
    HighPass,
}

/// A single-input, single-output sample processor with internal state.
pub trait Filter {
    /// Filters one sample.
    fn process(&mut self, input: Sample) -> Sample;

    /// Clears the filter history.
    fn reset(&mut self);
}

impl Stream {
    /// Runs every sample through `filter` in a new stage.
    pub fn filtered<F>(self, ctx: &Context, stage: &'static str, mut filter: F) -> Result<Stream>
    where
        F: Filter + Send + 'static,
    {
        source(ctx, stage, self.map(move |sample| filter.process(sample)))
    }

    /// First-order RC low- or high-pass at `cutoff` Hz.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCutoff`](crate::Error::InvalidCutoff) unless `cutoff` is
    /// finite and positive.
    pub fn rc_filter(self, ctx: &Context, pass: Pass, cutoff: f64) -> Result<Stream> {
        let filter = RcFilter::new(pass, cutoff, ctx.sample_rate())?;
        self.filtered(ctx, "rc", filter)
    }

    /// Chebyshev type I low- or high-pass.
    ///
    /// # Arguments
    ///
    /// * `cutoff` - Corner frequency in Hz, below Nyquist
    /// * `ripple` - Passband ripple in percent (0 gives a Butterworth response)
    /// * `poles` - Even pole count, 2 to 20
    pub fn chebyshev(
        self,
        ctx: &Context,
        pass: Pass,
        cutoff: f64,
        ripple: f64,
        poles: usize,
    ) -> Result<Stream> {
        let filter = Chebyshev::new(pass, cutoff, ripple, poles, ctx.sample_rate())?;
        self.filtered(ctx, "chebyshev", filter)
    }

    /// Chebyshev band-pass: a high-pass at `low` followed by a low-pass at `high`.
    ///
    /// Both halves are designed before either stage starts.
    pub fn chebyshev_band_pass(
        self,
        ctx: &Context,
        low: f64,
        high: f64,
        ripple: f64,
        poles: usize,
    ) -> Result<Stream> {
        let high_pass = Chebyshev::new(Pass::HighPass, low, ripple, poles, ctx.sample_rate())?;
        let low_pass = Chebyshev::new(Pass::LowPass, high, ripple, poles, ctx.sample_rate())?;
        self.filtered(ctx, "chebyshev", high_pass)?
            .filtered(ctx, "chebyshev", low_pass)
    }
}
