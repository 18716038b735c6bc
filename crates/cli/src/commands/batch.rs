use anyhow::{Context, Result};
use cultevo_analysis::analysis::{
    check_windows, run_repetitions_with_progress, summarize_windows, BatchSummary, WindowSummary,
};
use serde::Serialize;

use super::progress_bar;
use crate::args::{ModelArgs, OutputFormat};
use crate::defaults;
use crate::printing::{print_batch_summary, print_json, print_parameters, print_window_summaries};

#[derive(Serialize)]
struct BatchReport {
    base_seed: u64,
    summary: BatchSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    windows: Vec<WindowSummary>,
}

pub fn run_batch(
    model: &ModelArgs,
    repetitions: usize,
    windows: &[usize],
    format: OutputFormat,
    show_progress: bool,
) -> Result<()> {
    let mut config = model.resolve()?;
    // Window analysis reuses the batch's own frequency histories
    let window_top = match (windows.is_empty(), config.top) {
        (false, Some(top)) => {
            check_windows(&config, windows).context("Invalid window lengths")?;
            config.raw = true;
            Some(top)
        }
        _ => None,
    };
    let base_seed = config.seed.unwrap_or(defaults::BATCH_SEED);

    let pretty = format == OutputFormat::Pretty;
    if pretty {
        println!("🌱 Cultevo - Batch of {repetitions} Repetitions");
        println!("============================================");
        print_parameters(&config);
        println!("Base seed: {base_seed}");
    }

    let pb = progress_bar(repetitions, show_progress && pretty)?;
    let outputs = run_repetitions_with_progress(&config, repetitions, base_seed, || pb.inc(1))
        .context("Batch failed")?;
    pb.finish_and_clear();

    let summary = BatchSummary::from_outputs(&outputs);
    let windows = window_top
        .map(|top| summarize_windows(&outputs, windows, top))
        .unwrap_or_default();

    match format {
        OutputFormat::Pretty => {
            print_batch_summary(&summary);
            if !windows.is_empty() {
                print_window_summaries(&windows);
            }
        }
        OutputFormat::Json => print_json(&BatchReport {
            base_seed,
            summary,
            windows,
        })?,
    }
    Ok(())
}
