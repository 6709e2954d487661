//! Shared CLI helpers used across multiple commands.

use std::io::{BufWriter, ErrorKind, Write};

use clap::{Args, ValueEnum};
use plucked_config::{SynthSettings, TonePreset};
use plucked_core::{Context, Stream};
use serde::Serialize;

/// How a rendered tone is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable per-period peak and RMS table
    #[default]
    Summary,
    /// One sample per line
    Raw,
    /// Summary as JSON
    Json,
}

/// Engine overrides shared by every rendering command.
///
/// Values not given on the command line come from the user's `plucked.toml`,
/// then from the built-in defaults.
#[derive(Args, Debug, Clone, Copy)]
pub struct EngineArgs {
    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Capacity of every stream edge, in samples
    #[arg(long)]
    pub buffer_size: Option<usize>,
}

impl EngineArgs {
    /// Resolve the synthesis context.
    pub fn context(&self) -> anyhow::Result<Context> {
        let mut settings = SynthSettings::load_or_default()?;
        if let Some(rate) = self.sample_rate {
            settings.sample_rate = rate;
        }
        if let Some(size) = self.buffer_size {
            settings.buffer_size = size;
        }
        Ok(settings.context()?)
    }
}

/// Load a preset by name or path.
///
/// Factory presets win over user presets of the same name.
pub fn load_preset(name: &str) -> anyhow::Result<TonePreset> {
    Ok(TonePreset::resolve(name)?)
}

/// Peak and RMS of one loop period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodStats {
    /// Zero-based period number.
    pub index: usize,
    /// Largest absolute sample.
    pub peak: f64,
    /// Root mean square.
    pub rms: f64,
}

/// Statistics of a rendered tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneSummary {
    /// Tone or preset name.
    pub name: String,
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Delay line length in samples.
    pub period: usize,
    /// Pitch implied by the delay length.
    pub frequency: f64,
    /// Number of samples rendered.
    pub samples: usize,
    /// Rendered length in seconds.
    pub seconds: f64,
    /// Largest absolute sample.
    pub peak: f64,
    /// Root mean square over the whole tone.
    pub rms: f64,
    /// Per-period statistics; the last period may be partial.
    pub periods: Vec<PeriodStats>,
}

impl ToneSummary {
    /// Summarise `samples` in chunks of `period`.
    pub fn new(name: &str, ctx: &Context, period: usize, samples: &[f64]) -> Self {
        let periods = samples
            .chunks(period.max(1))
            .enumerate()
            .map(|(index, chunk)| PeriodStats {
                index,
                peak: peak(chunk),
                rms: rms(chunk),
            })
            .collect();

        Self {
            name: name.to_string(),
            sample_rate: ctx.sample_rate(),
            period,
            frequency: ctx.sample_rate() / period as f64,
            samples: samples.len(),
            seconds: samples.len() as f64 / ctx.sample_rate(),
            peak: peak(samples),
            rms: rms(samples),
            periods,
        }
    }
}

fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()))
}

fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

/// Most rows printed in the summary table.
const MAX_ROWS: usize = 24;

fn print_summary(summary: &ToneSummary) {
    println!("Tone: {}", summary.name);
    println!("  Sample rate: {} Hz", summary.sample_rate);
    println!(
        "  Period:      {} samples ({:.2} Hz)",
        summary.period, summary.frequency
    );
    println!(
        "  Rendered:    {} samples ({:.3} s)",
        summary.samples, summary.seconds
    );
    println!("  Peak:        {:.6}", summary.peak);
    println!("  RMS:         {:.6}", summary.rms);

    if summary.periods.is_empty() {
        return;
    }

    println!();
    println!("  {:>7}  {:>10}  {:>10}", "period", "peak", "rms");
    let step = summary.periods.len().div_ceil(MAX_ROWS);
    for stats in summary.periods.iter().step_by(step) {
        println!(
            "  {:>7}  {:>10.6}  {:>10.6}",
            stats.index, stats.peak, stats.rms
        );
    }
}

/// Stream samples to stdout, one per line.
///
/// A closed pipe (`plucked pluck saw --format raw | head`) ends output quietly;
/// dropping the stream then shuts down the graph.
fn write_raw(mut stream: Stream) -> anyhow::Result<usize> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut written = 0;

    let result = stream
        .try_for_each(|sample| {
            writeln!(out, "{sample}")?;
            written += 1;
            Ok::<(), std::io::Error>(())
        })
        .and_then(|()| out.flush());

    match result {
        Ok(()) => Ok(written),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!(written, "stdout closed");
            Ok(written)
        }
        Err(e) => Err(e.into()),
    }
}

/// Render a finite stream in the requested format.
pub fn render(
    name: &str,
    ctx: &Context,
    period: usize,
    stream: Stream,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Raw => {
            let written = write_raw(stream)?;
            tracing::info!(name, written, "rendered tone");
        }
        OutputFormat::Summary | OutputFormat::Json => {
            let samples: Vec<f64> = stream.collect();
            tracing::info!(name, samples = samples.len(), "rendered tone");
            let summary = ToneSummary::new(name, ctx, period, &samples);
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_splits_into_periods() {
        let ctx = Context::new(8.0, 4).unwrap();
        let samples = [1.0, -1.0, 1.0, -1.0, 0.5, -0.5, 0.5, -0.5, 0.25];
        let summary = ToneSummary::new("test", &ctx, 4, &samples);

        assert_eq!(summary.samples, 9);
        assert_eq!(summary.frequency, 2.0);
        assert_eq!(summary.periods.len(), 3);
        assert_eq!(summary.periods[0].peak, 1.0);
        assert_eq!(summary.periods[1].rms, 0.5);
        assert_eq!(summary.periods[2].peak, 0.25);
        assert_eq!(summary.peak, 1.0);
    }

    #[test]
    fn summary_of_silence() {
        let ctx = Context::default();
        let summary = ToneSummary::new("empty", &ctx, 100, &[]);
        assert!(summary.periods.is_empty());
        assert_eq!(summary.rms, 0.0);
    }

    #[test]
    fn summary_serializes_to_json() {
        let ctx = Context::new(100.0, 4).unwrap();
        let summary = ToneSummary::new("json", &ctx, 2, &[0.5, -0.5]);
        let value: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["name"], "json");
        assert_eq!(value["period"], 2);
        assert_eq!(value["periods"][0]["peak"], 0.5);
    }

    #[test]
    fn load_preset_prefers_factory() {
        let preset = load_preset("demo_saw").unwrap();
        assert_eq!(preset.name, "Demo Saw");
        let err = load_preset("no_such_preset_98765").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<plucked_config::ConfigError>(),
            Some(plucked_config::ConfigError::PresetNotFound { .. })
        ));
    }
}
