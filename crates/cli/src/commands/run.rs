use anyhow::{Context, Result};
use cultevo_sim::simulation::Simulation;

use super::progress_bar;
use crate::args::{ModelArgs, OutputFormat};
use crate::printing::{print_json, print_output, print_parameters};

pub fn run_transmission(
    model: &ModelArgs,
    raw: bool,
    format: OutputFormat,
    show_progress: bool,
) -> Result<()> {
    let mut config = model.resolve()?;
    config.raw = raw;

    let pretty = format == OutputFormat::Pretty;
    if pretty {
        println!("🌱 Cultevo - Running Transmission");
        println!("============================================");
        print_parameters(&config);
    }

    let timesteps = config.timesteps;
    let mut sim = Simulation::new(config).context("Failed to initialize simulation")?;

    let pb = progress_bar(timesteps, show_progress && pretty)?;
    while !sim.is_finished() {
        sim.step();
        pb.inc(1);
    }
    pb.finish_and_clear();

    let out = sim.finish();
    match format {
        OutputFormat::Pretty => {
            println!("✓ Simulation complete!\n");
            print_output(&out);
        }
        OutputFormat::Json => print_json(&out)?,
    }
    Ok(())
}
