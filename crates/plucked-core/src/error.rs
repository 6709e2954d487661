//! Construction errors for stream stages and tones.
//!
//! Every variant except [`Error::Spawn`] is raised while validating parameters,
//! before any stage thread exists. A misconfigured tone never starts running.

use thiserror::Error;

/// Errors raised while assembling a stream graph.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample rate was zero, negative, or not finite.
    #[error("sample rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f64),

    /// Stream buffer capacity of zero would deadlock the feedback edge.
    #[error("stream buffer size must be at least one sample")]
    ZeroBufferSize,

    /// A delay line of length zero cannot break a feedback cycle.
    #[error("delay length must be at least one sample")]
    ZeroDelay,

    /// A delay line longer than [`DelayLine::MAX_LENGTH`](crate::DelayLine::MAX_LENGTH).
    #[error("delay length {length} exceeds the maximum of {max} samples")]
    DelayTooLong {
        /// Requested length in samples.
        length: usize,
        /// Longest supported line.
        max: usize,
    },

    /// Excitation bursts must contain at least one sample.
    #[error("excitation length must be at least one sample")]
    EmptyExcitation,

    /// Decay factor was zero, negative, or not finite.
    #[error("decay factor must be a positive finite number, got {0}")]
    InvalidDecay(f64),

    /// Filter cutoff was zero, negative, or not finite.
    #[error("cutoff frequency must be a positive finite number, got {0}")]
    InvalidCutoff(f64),

    /// Cutoff at or above Nyquist for a filter that cannot represent it.
    #[error("cutoff {cutoff} Hz must be below Nyquist ({nyquist} Hz)")]
    CutoffAboveNyquist {
        /// Requested cutoff in Hz.
        cutoff: f64,
        /// Half the context sample rate.
        nyquist: f64,
    },

    /// Formant Q factor was zero, negative, or not finite.
    #[error("Q factor must be a positive finite number, got {0}")]
    InvalidQ(f64),

    /// Gain or scale factor was not finite.
    #[error("gain must be finite, got {0}")]
    InvalidGain(f64),

    /// Oscillator frequency was zero, negative, or not finite.
    #[error("frequency must be a positive finite number, got {0}")]
    InvalidFrequency(f64),

    /// Frequency is so high that one period rounds down to zero samples.
    #[error("frequency {frequency} Hz has a period shorter than one sample at {sample_rate} Hz")]
    FrequencyTooHigh {
        /// Requested frequency in Hz.
        frequency: f64,
        /// Context sample rate in Hz.
        sample_rate: f64,
    },

    /// Frequency is so low that one period would not fit in a delay line.
    #[error("frequency {frequency} Hz has a period longer than {max} samples at {sample_rate} Hz")]
    FrequencyTooLow {
        /// Requested frequency in Hz.
        frequency: f64,
        /// Context sample rate in Hz.
        sample_rate: f64,
        /// Longest supported period in samples.
        max: usize,
    },

    /// Chebyshev designs support even pole counts from 2 to 20.
    #[error("pole count must be even and within 2..=20, got {0}")]
    InvalidPoleCount(usize),

    /// Chebyshev passband ripple is given in percent.
    #[error("passband ripple must be within 0..=29 percent, got {0}")]
    InvalidRipple(f64),

    /// The operating system refused to start a stage thread.
    #[error("failed to spawn {stage} stage: {source}")]
    Spawn {
        /// Name of the stage being started.
        stage: &'static str,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for graph construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Accepts finite, strictly positive values.
pub(crate) fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
