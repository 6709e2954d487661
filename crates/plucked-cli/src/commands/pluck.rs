//! Pluck a single string from the command line.

use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, ValueEnum};
use plucked_core::{Context, Excitation, pluck};

use super::common::{EngineArgs, OutputFormat, render};

/// Excitation types for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliExcitation {
    /// One period of a triangle wave
    Triangle,
    /// One period of a sawtooth
    #[default]
    Saw,
    /// A seeded noise burst
    Noise,
}

#[derive(Args)]
pub struct PluckArgs {
    /// Excitation burst fed into the string
    #[arg(value_enum, default_value_t = CliExcitation::Saw)]
    excitation: CliExcitation,

    /// Pitch in Hz
    #[arg(long, default_value = "110.0")]
    freq: f64,

    /// Noise seed
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Noise burst length in samples (default: one period of --freq)
    #[arg(long)]
    length: Option<usize>,

    /// Damping low-pass cutoff in Hz
    #[arg(long, default_value = "1000.0")]
    cutoff: f64,

    /// Loop gain per period
    #[arg(long, default_value = "0.98")]
    decay: f64,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    #[command(flatten)]
    engine: EngineArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

impl PluckArgs {
    fn excitation(&self, ctx: &Context) -> anyhow::Result<Excitation> {
        Ok(match self.excitation {
            CliExcitation::Triangle => Excitation::Triangle {
                frequency: self.freq,
            },
            CliExcitation::Saw => Excitation::Saw {
                frequency: self.freq,
            },
            CliExcitation::Noise => Excitation::Noise {
                seed: self.seed,
                length: match self.length {
                    Some(length) => length,
                    None => ctx.delay_for_frequency(self.freq)?,
                },
            },
        })
    }
}

pub fn run(args: PluckArgs) -> anyhow::Result<()> {
    let ctx = args.engine.context()?;
    let duration = Duration::try_from_secs_f64(args.duration)
        .with_context(|| format!("invalid duration: {}", args.duration))?;

    let excitation = args.excitation(&ctx)?;
    let period = excitation.delay_samples(&ctx)?;
    let stream = pluck(&ctx, &excitation, args.cutoff, args.decay)?
        .truncate_duration(&ctx, duration)?;

    let name = format!("{} pluck", excitation.kind());
    render(&name, &ctx, period, stream, args.format)
}
