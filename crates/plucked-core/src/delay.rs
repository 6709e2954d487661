//! Fixed-length delay line, the element that makes a feedback loop schedulable.
//!
//! A [`DelayLine`] of length `L` is a circular buffer pre-seeded with `L` zeros.
//! Per step it emits the value at the cursor, stores the next input in the same
//! slot and advances the cursor modulo `L`, so
//!
//! ```text
//! y[t] = 0          for t < L
//! y[t] = x[t - L]   otherwise
//! ```
//!
//! # Inside a cycle
//!
//! The stage built by [`Stream::delay`] does not wait for input before it emits.
//! The `L` seeded zeros are available to the consumer immediately, and the stage
//! waits on its input and output edges at the same time, taking whichever is
//! ready. That is what lets the first samples travel round a loop that contains
//! the delay: without the seeded values every stage in the loop would wait on
//! every other one.
//!
//! The line never holds more than `L` values. While it is full the stage only
//! offers output; once it has room again it accepts input. Emission is never
//! delayed behind acceptance of the corresponding input.
//!
//! # Example
//!
//! ```rust
//! use plucked_core::{Context, Stream};
//!
//! let ctx = Context::new(48000.0, 16).unwrap();
//! let input = Stream::from_samples(&ctx, vec![1.0, 2.0, 3.0]).unwrap();
//! let delayed: Vec<f64> = input.delay(&ctx, 2).unwrap().collect();
//! assert_eq!(delayed, vec![0.0, 0.0, 1.0, 2.0, 3.0]);
//! ```

use crossbeam_channel::{Select, Sender};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::stream::{Sample, Stream, edge, spawn_stage};

/// Circular buffer delaying its input by exactly `len()` samples.
///
/// # Invariants
///
/// - `buffer.len() >= 1`
/// - `queued <= buffer.len()`; the queued values start at `cursor` and wrap
///
/// # Example
///
/// ```rust
/// use plucked_core::DelayLine;
///
/// let mut line = DelayLine::new(2).unwrap();
/// assert_eq!(line.process(1.0), 0.0);
/// assert_eq!(line.process(2.0), 0.0);
/// assert_eq!(line.process(3.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<Sample>,
    /// Slot holding the oldest queued value
    cursor: usize,
    /// Values waiting to be emitted
    queued: usize,
}

impl DelayLine {
    /// Longest line that can be built: 2^22 samples, over 10 s at 384 kHz.
    pub const MAX_LENGTH: usize = 1 << 22;

    /// Checks that `length` fits a line, without allocating one.
    pub fn check_length(length: usize) -> Result<()> {
        match length {
            0 => Err(Error::ZeroDelay),
            n if n > Self::MAX_LENGTH => Err(Error::DelayTooLong {
                length: n,
                max: Self::MAX_LENGTH,
            }),
            _ => Ok(()),
        }
    }

    /// Creates a line of `length` samples, full of zeros.
    pub fn new(length: usize) -> Result<Self> {
        Self::check_length(length)?;
        Ok(Self {
            buffer: vec![0.0; length],
            cursor: 0,
            queued: length,
        })
    }

    /// Delay in samples.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false; a line holds at least one slot.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Next value to emit, if any is queued.
    pub fn front(&self) -> Option<Sample> {
        (self.queued > 0).then(|| self.buffer[self.cursor])
    }

    /// Removes and returns the next value to emit.
    pub fn pop(&mut self) -> Option<Sample> {
        let value = self.front()?;
        self.cursor = (self.cursor + 1) % self.buffer.len();
        self.queued -= 1;
        Some(value)
    }

    /// True while another input can be stored without overwriting.
    pub fn has_room(&self) -> bool {
        self.queued < self.buffer.len()
    }

    /// Stores `value` behind everything queued. Returns false when full.
    pub fn push(&mut self, value: Sample) -> bool {
        if !self.has_room() {
            return false;
        }
        let slot = (self.cursor + self.queued) % self.buffer.len();
        self.buffer[slot] = value;
        self.queued += 1;
        true
    }

    /// One lockstep step: emit the value at the cursor, store `input` in its
    /// place, advance.
    ///
    /// A line that has been drained by [`pop`](Self::pop) emits silence for the
    /// missing values.
    #[inline]
    pub fn process(&mut self, input: Sample) -> Sample {
        let output = self.pop().unwrap_or(0.0);
        self.push(input);
        output
    }

    /// Number of values waiting to be emitted.
    pub fn queued(&self) -> usize {
        self.queued
    }
}

/// Outcome of one wait on the delay stage's edges.
enum Step {
    Sent,
    Received(Sample),
    InputClosed,
    OutputClosed,
}

impl Stream {
    /// Delays the stream by `length` samples, emitting `length` zeros first.
    ///
    /// When the input ends, the values still in the line are flushed, so a
    /// finite input of `n` samples yields `length + n` samples.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroDelay`] when `length` is zero and [`Error::DelayTooLong`]
    /// above [`DelayLine::MAX_LENGTH`], before any thread starts.
    pub fn delay(self, ctx: &Context, length: usize) -> Result<Stream> {
        let mut line = DelayLine::new(length)?;
        let (tx, out) = edge(ctx);
        spawn_stage("delay", move || run(&mut line, Some(self), &tx))?;
        Ok(out)
    }
}

fn run(line: &mut DelayLine, mut input: Option<Stream>, tx: &Sender<Sample>) -> usize {
    let mut sent = 0;
    loop {
        let step = {
            let head = line.front();
            let mut select = Select::new();
            let send = head.map(|_| select.send(tx));
            let recv = match &input {
                Some(stream) if line.has_room() => Some(select.recv(stream.receiver())),
                _ => None,
            };
            if send.is_none() && recv.is_none() {
                break;
            }

            let op = select.select();
            match (send, head) {
                (Some(send), Some(value)) if op.index() == send => match op.send(tx, value) {
                    Ok(()) => {
                        line.pop();
                        Step::Sent
                    }
                    Err(_) => Step::OutputClosed,
                },
                // Only two operations are registered, so this one is the receive
                _ => match input.as_ref().map(|stream| op.recv(stream.receiver())) {
                    Some(Ok(value)) => Step::Received(value),
                    Some(Err(_)) | None => Step::InputClosed,
                },
            }
        };

        match step {
            Step::Sent => sent += 1,
            Step::Received(value) => {
                line.push(value);
            }
            Step::InputClosed => {
                tracing::trace!(queued = line.queued(), "delay input ended, draining");
                input = None;
            }
            Step::OutputClosed => break,
        }
    }
    sent
}
