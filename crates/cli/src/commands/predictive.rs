use anyhow::{anyhow, Context, Result};
use cultevo_analysis::analysis::{
    phased_predictive, posterior_predictive, BatchSummary, BiasPosterior, PosteriorColumn,
};
use serde::Serialize;
use std::path::Path;

use crate::args::{ModelArgs, OutputFormat};
use crate::defaults;
use crate::printing::{print_batch_summary, print_json, print_parameters};

#[derive(Serialize)]
struct PredictiveReport {
    source: String,
    summary: BatchSummary,
}

fn load_posterior(path: &Path) -> Result<BiasPosterior> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read posterior file {}", path.display()))?;
    let posterior: BiasPosterior = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse posterior file {}", path.display()))?;
    posterior.validate().context("Invalid posterior")?;
    Ok(posterior)
}

pub fn run_predictive(
    posterior_path: &Path,
    column: &str,
    phase_lengths: &[usize],
    model: &ModelArgs,
    format: OutputFormat,
) -> Result<()> {
    let posterior = load_posterior(posterior_path)?;
    let mut config = model.resolve()?;
    let base_seed = config.seed.unwrap_or(defaults::BATCH_SEED);

    // Phase lengths fix the run length
    if !phase_lengths.is_empty() {
        config.timesteps = phase_lengths.iter().sum();
        config.bias = posterior.phase_schedule(0, phase_lengths)?;
        config.validate().context("Invalid configuration")?;
    }

    let pretty = format == OutputFormat::Pretty;
    if pretty {
        println!("🌱 Cultevo - Posterior Predictive");
        println!("============================================");
        print_parameters(&config);
    }

    let (source, outputs) = if phase_lengths.is_empty() {
        let column: PosteriorColumn = column.parse().map_err(|e: String| anyhow!(e))?;
        let outputs = posterior_predictive(&posterior, column, &config, base_seed)
            .with_context(|| format!("Posterior-predictive runs over {column} failed"))?;
        (column.to_string(), outputs)
    } else {
        let outputs = phased_predictive(&posterior, phase_lengths, &config, base_seed)
            .context("Phased posterior-predictive runs failed")?;
        ("phases".to_string(), outputs)
    };

    let summary = BatchSummary::from_outputs(&outputs);
    match format {
        OutputFormat::Pretty => {
            println!("Source: {source} ({} draws)", outputs.len());
            print_batch_summary(&summary);
        }
        OutputFormat::Json => print_json(&PredictiveReport { source, summary })?,
    }
    Ok(())
}
