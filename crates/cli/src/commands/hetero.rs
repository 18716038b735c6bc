use anyhow::{Context, Result};
use cultevo_analysis::analysis::{run_hetero_repetitions, BatchSummary};
use cultevo_sim::simulation::{hetero_pop_transmission, HeteroConfig};

use crate::args::OutputFormat;
use crate::defaults;
use crate::printing::{
    print_batch_summary, print_hetero_output, print_hetero_parameters, print_json,
};

pub fn run_hetero(
    config: &HeteroConfig,
    repetitions: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    if format == OutputFormat::Pretty {
        println!("🌱 Cultevo - Heterogeneous Population");
        println!("============================================");
        print_hetero_parameters(config);
    }

    match repetitions {
        None => {
            let out = hetero_pop_transmission(config).context("Simulation failed")?;
            match format {
                OutputFormat::Pretty => print_hetero_output(&out),
                OutputFormat::Json => print_json(&out)?,
            }
        }
        Some(repetitions) => {
            let base_seed = config.seed.unwrap_or(defaults::BATCH_SEED);
            let outputs = run_hetero_repetitions(config, repetitions, base_seed)
                .context("Batch failed")?;
            let summary = BatchSummary::from_hetero_outputs(&outputs);
            match format {
                OutputFormat::Pretty => print_batch_summary(&summary),
                OutputFormat::Json => print_json(&summary)?,
            }
        }
    }
    Ok(())
}
