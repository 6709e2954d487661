//! Pluck demo: the reference tone, built stage by stage, with a per-period readout.
//!
//! Run with: cargo run -p plucked-core --example pluck_demo

use std::time::Duration;

use plucked_core::{Context, Excitation, Pass, Result, pluck};

fn main() -> Result<()> {
    let ctx = Context::new(44100.0, 1024)?;
    let excitation = Excitation::Saw { frequency: 100.0 };
    let period = excitation.delay_samples(&ctx)?;

    // Sawtooth pluck, dark tone control, turned down
    let tone = pluck(&ctx, &excitation, 1000.0, 0.98)?
        .rc_filter(&ctx, Pass::LowPass, 300.0)?
        .scale(&ctx, 0.1)?
        .truncate_duration(&ctx, Duration::from_millis(1500))?;
    let samples: Vec<f64> = tone.collect();

    println!("=== Saw pluck at 100 Hz ===\n");
    println!("Sample rate: {} Hz", ctx.sample_rate());
    println!("Period:      {period} samples");
    println!("Rendered:    {} samples\n", samples.len());

    println!("{:>7} {:>10} {:>10}", "Period", "Peak", "RMS");
    println!("{:->7} {:->10} {:->10}", "", "", "");
    for (index, chunk) in samples.chunks(period).enumerate().step_by(10) {
        let peak = chunk.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        let rms = (chunk.iter().map(|s| s * s).sum::<f64>() / chunk.len() as f64).sqrt();
        println!("{index:>7} {peak:>10.6} {rms:>10.6}");
    }

    Ok(())
}
