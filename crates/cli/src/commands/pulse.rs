use anyhow::{Context, Result};
use cultevo_analysis::analysis::pulse_experiment;

use crate::args::{ModelArgs, OutputFormat};
use crate::printing::{print_json, print_parameters, print_pulse};

pub fn run_pulse(
    model: &ModelArgs,
    baseline: f64,
    pulse: f64,
    onset: Option<usize>,
    duration: usize,
    recovery_window: usize,
    format: OutputFormat,
) -> Result<()> {
    let config = model.resolve()?;
    let onset = onset.unwrap_or(config.warm_up + config.window_len() / 2 + 1);

    if format == OutputFormat::Pretty {
        println!("🌱 Cultevo - Bias Pulse");
        println!("============================================");
        print_parameters(&config);
        println!(
            "Pulse: bias {pulse} for {duration} generations from generation {onset} (baseline {baseline})\n"
        );
    }

    let deviation = pulse_experiment(&config, baseline, pulse, onset, duration, recovery_window)
        .context("Pulse experiment failed")?;

    match format {
        OutputFormat::Pretty => print_pulse(&deviation),
        OutputFormat::Json => print_json(&deviation)?,
    }
    Ok(())
}
