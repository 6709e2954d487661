//! Render a preset.

use clap::Args;
use plucked_core::Excitation;

use super::common::{EngineArgs, OutputFormat, load_preset, render};

#[derive(Args)]
pub struct PresetArgs {
    /// Factory preset name, user preset name, or path to a TOML file
    name: String,

    /// Override the preset's duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Override the preset's output level
    #[arg(long)]
    level: Option<f64>,

    #[command(flatten)]
    engine: EngineArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

pub fn run(args: PresetArgs) -> anyhow::Result<()> {
    let ctx = args.engine.context()?;

    let mut preset = load_preset(&args.name)?;
    if let Some(duration) = args.duration {
        preset.duration = duration;
    }
    if let Some(level) = args.level {
        preset.level = level;
    }

    let period = Excitation::from(preset.excitation).delay_samples(&ctx)?;
    let stream = preset.build(&ctx)?;
    render(&preset.name, &ctx, period, stream, args.format)
}
