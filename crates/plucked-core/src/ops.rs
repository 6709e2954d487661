//! Stream combinators: mix, multiply, fork, truncate.
//!
//! Each combinator consumes its input streams and starts one stage thread.
//!
//! | Combinator | Ends when |
//! |------------|-----------|
//! | [`Stream::add`] | both operands have ended (an ended operand counts as silence) |
//! | [`Stream::mul`] | either operand ends |
//! | [`Stream::scale`] | the input ends |
//! | [`Stream::fork`] | the input ends or either branch hangs up |
//! | [`Stream::truncate`] | `n` samples were delivered or the input ends |

use std::time::Duration;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::stream::{Sample, Stream, edge, forward, source, spawn_stage};

/// Infinite stream repeating `value`.
pub fn constant(ctx: &Context, value: Sample) -> Result<Stream> {
    source(ctx, "constant", std::iter::repeat(value))
}

impl Stream {
    /// Sample-wise sum of two streams.
    ///
    /// Once one operand ends it contributes silence, so the mix degenerates to a
    /// pass-through of the survivor. The sum ends only when both have ended. A
    /// finite excitation mixed with an endless feedback path therefore keeps
    /// sounding after the excitation is spent.
    pub fn add(self, ctx: &Context, other: Stream) -> Result<Stream> {
        let sum = Sum {
            a: Some(self),
            b: Some(other),
        };
        source(ctx, "add", sum)
    }

    /// Sample-wise product of two streams, ending with the shorter one.
    pub fn mul(self, ctx: &Context, other: Stream) -> Result<Stream> {
        source(ctx, "mul", self.zip(other).map(|(a, b)| a * b))
    }

    /// Multiplies every sample by a constant factor.
    pub fn scale(self, ctx: &Context, factor: f64) -> Result<Stream> {
        if !factor.is_finite() {
            return Err(Error::InvalidGain(factor));
        }
        source(ctx, "scale", self.map(move |sample| sample * factor))
    }

    /// Duplicates the stream into two independent, order-identical copies.
    ///
    /// Each sample is delivered to the first branch, then the second. The
    /// branches share one cursor, so the faster consumer runs at most one edge
    /// capacity ahead of the slower one; values are never altered by timing. The
    /// stage stops as soon as either branch hangs up.
    pub fn fork(self, ctx: &Context) -> Result<(Stream, Stream)> {
        let (first_tx, first) = edge(ctx);
        let (second_tx, second) = edge(ctx);
        spawn_stage("fork", move || {
            let mut sent = 0;
            for sample in self {
                if first_tx.send(sample).is_err() || second_tx.send(sample).is_err() {
                    break;
                }
                sent += 1;
            }
            sent
        })?;
        Ok((first, second))
    }

    /// Keeps the first `count` samples and then ends, releasing the input.
    pub fn truncate(self, ctx: &Context, count: usize) -> Result<Stream> {
        source(ctx, "truncate", self.take(count))
    }

    /// Keeps `floor(duration · sample_rate)` samples and then ends.
    pub fn truncate_duration(self, ctx: &Context, duration: Duration) -> Result<Stream> {
        self.truncate(ctx, ctx.samples_for(duration))
    }

    /// Forwards every sample into a fresh edge unchanged.
    ///
    /// Useful to put an extra buffer between a producer and a slow consumer.
    pub fn pipe(self, ctx: &Context) -> Result<Stream> {
        let (tx, out) = edge(ctx);
        spawn_stage("pipe", move || forward(self, &tx))?;
        Ok(out)
    }
}

/// Additive mix that treats an exhausted operand as silence.
struct Sum {
    a: Option<Stream>,
    b: Option<Stream>,
}

impl Iterator for Sum {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let a = pull(&mut self.a);
        let b = pull(&mut self.b);
        match (a, b) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
        }
    }
}

/// Reads one sample, releasing the stream once it has ended.
fn pull(slot: &mut Option<Stream>) -> Option<Sample> {
    let sample = slot.as_mut()?.next();
    if sample.is_none() {
        *slot = None;
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn ctx() -> Context {
        Context::new(1000.0, 4).unwrap()
    }

    fn stream(ctx: &Context, samples: &[Sample]) -> Stream {
        Stream::from_samples(ctx, samples.to_vec()).unwrap()
    }

    #[test]
    fn add_sums_sample_for_sample() {
        let ctx = ctx();
        let a = stream(&ctx, &[1.0, 2.0, 3.0]);
        let b = stream(&ctx, &[0.5, 0.5, 0.5]);
        let out: Vec<_> = a.add(&ctx, b).unwrap().collect();
        assert_eq!(out, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn add_treats_ended_operand_as_silence() {
        let ctx = ctx();
        let short = stream(&ctx, &[1.0, 1.0]);
        let long = stream(&ctx, &[0.25, 0.25, 0.25, 0.25, 0.25]);
        let out: Vec<_> = short.add(&ctx, long).unwrap().collect();
        assert_eq!(out, vec![1.25, 1.25, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn add_keeps_running_with_infinite_operand() {
        let ctx = ctx();
        let burst = stream(&ctx, &[1.0]);
        let hum = constant(&ctx, 0.5).unwrap();
        let out: Vec<_> = burst.add(&ctx, hum).unwrap().take(50).collect();
        assert_eq!(out.len(), 50);
        assert_eq!(out[0], 1.5);
        assert!(out[1..].iter().all(|&s| s == 0.5));
    }

    #[test]
    fn mul_ends_with_shorter_operand() {
        let ctx = ctx();
        let a = stream(&ctx, &[1.0, 2.0, 3.0, 4.0]);
        let b = stream(&ctx, &[2.0, 2.0]);
        let out: Vec<_> = a.mul(&ctx, b).unwrap().collect();
        assert_eq!(out, vec![2.0, 4.0]);
    }

    #[test]
    fn mul_by_constant_stream() {
        let ctx = ctx();
        let a = stream(&ctx, &[1.0, -2.0, 4.0]);
        let out: Vec<_> = a.mul(&ctx, constant(&ctx, 0.5).unwrap()).unwrap().collect();
        assert_eq!(out, vec![0.5, -1.0, 2.0]);
    }

    #[test]
    fn scale_rejects_non_finite_factor() {
        let ctx = ctx();
        let a = stream(&ctx, &[1.0]);
        assert!(matches!(a.scale(&ctx, f64::NAN), Err(Error::InvalidGain(_))));
    }

    #[test]
    fn fork_with_uneven_consumers() {
        let ctx = ctx();
        let input: Vec<Sample> = (0..200).map(|i| f64::from(i) * 0.01).collect();
        let (left, right) = stream(&ctx, &input).fork(&ctx).unwrap();

        let slow = thread::spawn(move || {
            right
                .inspect(|_| thread::sleep(Duration::from_micros(50)))
                .collect::<Vec<_>>()
        });
        let fast: Vec<_> = left.collect();
        let slow = slow.join().unwrap();

        assert_eq!(fast, input);
        assert_eq!(slow, input);
    }

    #[test]
    fn fork_stops_when_a_branch_hangs_up() {
        let ctx = ctx();
        let (left, right) = constant(&ctx, 1.0).unwrap().fork(&ctx).unwrap();
        drop(right);
        // Anything sent before the hang-up is bounded by the right edge's capacity.
        assert!(left.count() <= ctx.buffer_size() + 1);
    }

    #[test]
    fn truncate_by_count() {
        let ctx = ctx();
        let out: Vec<_> = constant(&ctx, 0.3).unwrap().truncate(&ctx, 7).unwrap().collect();
        assert_eq!(out, vec![0.3; 7]);
    }

    #[test]
    fn truncate_shorter_input_ends_early() {
        let ctx = ctx();
        let out: Vec<_> = stream(&ctx, &[1.0, 2.0]).truncate(&ctx, 10).unwrap().collect();
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn truncate_duration_rounds_down() {
        let ctx = ctx();
        let out = constant(&ctx, 0.0)
            .unwrap()
            .truncate_duration(&ctx, Duration::from_micros(12_500))
            .unwrap();
        // 12.5 ms at 1 kHz
        assert_eq!(out.count(), 12);
    }

    #[test]
    fn pipe_is_transparent() {
        let ctx = ctx();
        let out: Vec<_> = stream(&ctx, &[3.0, 1.0, 2.0]).pipe(&ctx).unwrap().collect();
        assert_eq!(out, vec![3.0, 1.0, 2.0]);
    }
}
