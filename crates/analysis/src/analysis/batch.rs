//! Independent repetitions of one configuration.
//!
//! Repetitions run in parallel on the rayon pool. Each owns its own random
//! stream derived from the batch seed, so results are reproducible and are
//! returned in repetition order whatever the scheduling.

use crate::analysis::utils::repetition_streams;
use crate::error::{AnalysisError, Result};
use cultevo_sim::simulation::{
    HeteroConfig, HeteroOutput, Simulation, TransmissionConfig, TransmissionOutput,
};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::info;

/// Run `repetitions` independent copies of `config`.
///
/// `config.seed` is ignored; repetition `i` uses stream `i` of `base_seed`.
pub fn run_repetitions(
    config: &TransmissionConfig,
    repetitions: usize,
    base_seed: u64,
) -> Result<Vec<TransmissionOutput>> {
    run_repetitions_with_progress(config, repetitions, base_seed, || {})
}

/// Like [`run_repetitions`], calling `on_done` as each repetition completes.
pub fn run_repetitions_with_progress<F>(
    config: &TransmissionConfig,
    repetitions: usize,
    base_seed: u64,
    on_done: F,
) -> Result<Vec<TransmissionOutput>>
where
    F: Fn() + Sync,
{
    if repetitions == 0 {
        return Err(AnalysisError::NoRepetitions);
    }
    config.validate()?;

    info!(
        repetitions,
        base_seed,
        population_size = config.population_size,
        timesteps = config.timesteps,
        bias = config.bias.mode(),
        "starting batch"
    );

    let outputs = repetition_streams(base_seed, repetitions)
        .into_par_iter()
        .map(|rng| {
            let out = run_one(config, rng);
            on_done();
            out
        })
        .collect::<Result<Vec<_>>>()?;

    info!(repetitions, "batch complete");
    Ok(outputs)
}

/// Run `repetitions` independent copies of a heterogeneous-bias configuration.
pub fn run_hetero_repetitions(
    config: &HeteroConfig,
    repetitions: usize,
    base_seed: u64,
) -> Result<Vec<HeteroOutput>> {
    run_hetero_repetitions_with_progress(config, repetitions, base_seed, || {})
}

pub fn run_hetero_repetitions_with_progress<F>(
    config: &HeteroConfig,
    repetitions: usize,
    base_seed: u64,
    on_done: F,
) -> Result<Vec<HeteroOutput>>
where
    F: Fn() + Sync,
{
    let outputs =
        run_repetitions_with_progress(&config.to_transmission(), repetitions, base_seed, on_done)?;
    Ok(outputs.into_iter().map(HeteroOutput::from).collect())
}

/// Run one configuration per entry of `configs`, entry `i` on stream `i`.
pub fn run_configs(configs: &[TransmissionConfig], base_seed: u64) -> Result<Vec<TransmissionOutput>> {
    if configs.is_empty() {
        return Err(AnalysisError::NoRepetitions);
    }
    configs.iter().try_for_each(TransmissionConfig::validate)?;

    info!(runs = configs.len(), base_seed, "starting batch of configurations");

    repetition_streams(base_seed, configs.len())
        .into_par_iter()
        .zip(configs.par_iter())
        .map(|(rng, config)| run_one(config, rng))
        .collect()
}

fn run_one(config: &TransmissionConfig, rng: Xoshiro256PlusPlus) -> Result<TransmissionOutput> {
    let mut sim = Simulation::with_rng(config.clone(), rng)?;
    sim.run();
    Ok(sim.finish())
}
