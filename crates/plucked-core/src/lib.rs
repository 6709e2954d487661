//! Plucked Core - Karplus-Strong string synthesis over threaded sample streams
//!
//! A plucked-string tone is a short burst of signal circulating in a feedback
//! loop: a delay line sets the pitch, a low-pass filter and a decay factor take
//! a little energy out on every pass. This crate builds that loop out of
//! independent stages connected by bounded channels.
//!
//! # Core Abstractions
//!
//! ## Streams
//!
//! - [`Context`] - Sample rate and edge capacity shared by every stage
//! - [`Stream`] - Consuming end of a bounded edge, an `Iterator` of samples
//! - [`Inlet`] / [`channel`] - Edge whose producer is attached later (feedback)
//!
//! ## Combinators
//!
//! [`Stream::add`], [`Stream::mul`], [`Stream::scale`], [`Stream::fork`],
//! [`Stream::truncate`], [`Stream::truncate_duration`], and [`constant`].
//!
//! ## Generators and Filters
//!
//! - [`Oscillator`] / [`triangle`] / [`saw`] - Naive periodic waveforms
//! - [`Noise`] / [`noise`] - Seeded, reproducible white noise
//! - [`RcFilter`] - First-order low/high-pass, the loop damping element
//! - [`Chebyshev`] - Type I low/high/band-pass
//!
//! ## Strings
//!
//! - [`DelayLine`] - Circular buffer seeded with silence; [`Stream::delay`]
//! - [`Excitation`] - One loop length of triangle, sawtooth, or noise
//! - [`KarplusStrong`] / [`karplus_strong`] / [`pluck`] - The feedback loop
//! - [`FormantBand`] / [`Stream::formant`] - Band boost or cut
//!
//! # Threads
//!
//! Every stage is a named OS thread (`plucked-<stage>`). Stages only talk through
//! their channels, block when an edge is full or empty, and shut down when their
//! input ends or their consumer hangs up. Dropping the final stream of a tone
//! stops every stage behind it.
//!
//! # Example
//!
//! ```rust
//! use plucked_core::{Context, Excitation, pluck};
//! use std::time::Duration;
//!
//! let ctx = Context::new(44100.0, 1024).unwrap();
//! let tone = pluck(&ctx, &Excitation::Saw { frequency: 100.0 }, 1000.0, 0.98).unwrap();
//! let samples: Vec<f64> = tone
//!     .truncate_duration(&ctx, Duration::from_millis(100))
//!     .unwrap()
//!     .collect();
//! assert_eq!(samples.len(), 4410);
//! ```

pub mod context;
pub mod delay;
pub mod error;
pub mod excitation;
pub mod filter;
pub mod formant;
pub mod generator;
pub mod karplus;
pub mod ops;
pub mod stream;

// Re-export main types at crate root
pub use context::Context;
pub use delay::DelayLine;
pub use error::{Error, Result};
pub use excitation::Excitation;
pub use filter::{Chebyshev, Filter, Pass, RcFilter};
pub use formant::{FORMANT_POLES, FORMANT_RIPPLE, FormantBand};
pub use generator::{Noise, Oscillator, Waveform, noise, saw, triangle};
pub use karplus::{
    KarplusStrong, karplus_strong, karplus_strong_noise, karplus_strong_saw,
    karplus_strong_triangle, pluck,
};
pub use ops::constant;
pub use stream::{Inlet, Sample, Stream, channel};
