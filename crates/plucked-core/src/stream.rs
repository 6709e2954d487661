//! Bounded sample streams and the stage threads that drive them.
//!
//! Every edge of the signal graph is a bounded `crossbeam-channel` sized from
//! [`Context::buffer_size`]. Every stage is a named OS thread that owns the
//! receiving end of its inputs and the sending end of its output. The channels
//! are the only synchronization: a full edge blocks its producer, an empty edge
//! blocks its consumer.
//!
//! # Termination
//!
//! - A stage whose input ends drops its sender, so end-of-stream travels downstream.
//! - A stage whose consumer hangs up sees its send fail, stops, and drops its own
//!   inputs, so abandonment travels upstream.
//!
//! Dropping the final [`Stream`] of a graph therefore winds down every stage behind
//! it, including stages that sit inside a feedback cycle.

use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::context::Context;
use crate::error::{Error, Result};

/// One amplitude value. No range is enforced.
pub type Sample = f64;

/// Consuming end of one stream edge.
///
/// Iterating blocks until the producing stage delivers the next sample and yields
/// `None` once that stage has finished. A stream has exactly one consumer; use
/// [`Stream::fork`] to read the same samples twice.
///
/// # Example
///
/// ```rust
/// use plucked_core::{Context, Stream};
///
/// let ctx = Context::default();
/// let stream = Stream::from_samples(&ctx, vec![0.5, -0.5, 0.25]).unwrap();
/// let doubled: Vec<f64> = stream.scale(&ctx, 2.0).unwrap().collect();
/// assert_eq!(doubled, vec![1.0, -1.0, 0.5]);
/// ```
#[derive(Debug)]
pub struct Stream {
    rx: Receiver<Sample>,
}

impl Stream {
    /// Starts a source stage that emits every sample of `samples` in order.
    ///
    /// The stream ends when the iterator does; an infinite iterator gives an
    /// infinite stream.
    pub fn from_samples<I>(ctx: &Context, samples: I) -> Result<Stream>
    where
        I: IntoIterator<Item = Sample>,
        I::IntoIter: Send + 'static,
    {
        source(ctx, "source", samples.into_iter())
    }

    /// Channel end, for stages that wait on several edges at once.
    pub(crate) fn receiver(&self) -> &Receiver<Sample> {
        &self.rx
    }
}

impl Iterator for Stream {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        self.rx.recv().ok()
    }
}

/// Producing end of an edge whose source is wired up later.
///
/// This is how a feedback input exists before the stages that will fill it:
/// create the pair with [`channel`], hand the [`Stream`] to its consumer, build
/// the rest of the graph, then close the loop with [`Inlet::feed`].
#[derive(Debug)]
pub struct Inlet {
    tx: Sender<Sample>,
}

impl Inlet {
    /// Starts a copy stage that forwards every sample of `source` into this inlet,
    /// in order, without dropping any.
    pub fn feed(self, source: Stream) -> Result<()> {
        let tx = self.tx;
        spawn_stage("pipe", move || forward(source, &tx))
    }
}

/// Creates an unconnected edge: the inlet is filled later by [`Inlet::feed`].
pub fn channel(ctx: &Context) -> (Inlet, Stream) {
    let (tx, stream) = edge(ctx);
    (Inlet { tx }, stream)
}

/// Creates a bounded edge sized from the context.
pub(crate) fn edge(ctx: &Context) -> (Sender<Sample>, Stream) {
    let (tx, rx) = bounded(ctx.buffer_size());
    (tx, Stream { rx })
}

/// Spawns a detached stage thread named `plucked-<stage>`.
///
/// `body` returns the number of samples it delivered, which is logged when the
/// stage finishes.
pub(crate) fn spawn_stage<F>(stage: &'static str, body: F) -> Result<()>
where
    F: FnOnce() -> usize + Send + 'static,
{
    tracing::debug!(target: "plucked::stage", stage, "spawning stage");
    thread::Builder::new()
        .name(format!("plucked-{stage}"))
        .spawn(move || {
            let samples = body();
            tracing::trace!(stage, samples, "stage finished");
        })
        .map(drop)
        .map_err(|source| Error::Spawn { stage, source })
}

/// Starts a stage that drains `samples` into a fresh edge.
///
/// Used for generators and for every one-in/one-out stage, which is a source
/// over an adapted input stream.
pub(crate) fn source<I>(ctx: &Context, stage: &'static str, samples: I) -> Result<Stream>
where
    I: Iterator<Item = Sample> + Send + 'static,
{
    let (tx, stream) = edge(ctx);
    spawn_stage(stage, move || forward(samples, &tx))?;
    Ok(stream)
}

/// Sends until the samples run out or the consumer hangs up.
pub(crate) fn forward<I>(samples: I, tx: &Sender<Sample>) -> usize
where
    I: Iterator<Item = Sample>,
{
    let mut sent = 0;
    for sample in samples {
        if tx.send(sample).is_err() {
            break;
        }
        sent += 1;
    }
    sent
}
