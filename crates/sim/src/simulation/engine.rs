//! Simulation engine for cultural transmission.
//!
//! This module provides the main simulation loop that drives the generation
//! step, records diversity over the statistics window and packages outputs.

use crate::base::{PopulationSnapshot, VariantArena};
use crate::errors::ConfigError;
use crate::evolution::{next_generation, InnovationModel};
use crate::simulation::{
    FrequencyMatrix, HeteroConfig, HeteroOutput, TransmissionConfig, TransmissionOutput,
};
use crate::statistics::estimate_turnover;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, trace};

/// Main simulation engine.
///
/// Generation 0 is a single founding variant held by every individual.
/// Each call to [`step`](Self::step) produces the next generation.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Validated configuration
    config: TransmissionConfig,
    /// Current generation
    snapshot: PopulationSnapshot,
    /// Identifier source for this run
    arena: VariantArena,
    innovation: InnovationModel,
    /// Number of generations simulated so far
    generation: usize,
    /// Diversity of every simulated generation inside the statistics window
    obs_div: Vec<f64>,
    /// Snapshots of the statistics window, kept only when needed
    history: Option<FrequencyMatrix>,
    /// Random number generator (Xoshiro256++)
    rng: Xoshiro256PlusPlus,
}

impl Simulation {
    /// Create a simulation from a configuration.
    ///
    /// The RNG is seeded from `config.seed`, or from the thread RNG when no
    /// seed is given.
    pub fn new(config: TransmissionConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };
        Self::with_rng(config, rng)
    }

    /// Create a simulation driven by an explicit random stream.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: TransmissionConfig, rng: Xoshiro256PlusPlus) -> Result<Self, ConfigError> {
        config.validate()?;
        let innovation = InnovationModel::new(config.innovation_rate)?;

        let mut arena = VariantArena::new();
        let founder = arena.mint();
        let snapshot = PopulationSnapshot::monomorphic(founder, config.population_size);

        let history = config
            .records_history()
            .then(|| FrequencyMatrix::new(config.warm_up + 1));

        debug!(
            population_size = config.population_size,
            innovation_rate = config.innovation_rate,
            timesteps = config.timesteps,
            warm_up = config.warm_up,
            bias = config.bias.mode(),
            "simulation initialized"
        );

        Ok(Self {
            obs_div: Vec::with_capacity(config.window_len()),
            config,
            snapshot,
            arena,
            innovation,
            generation: 0,
            history,
            rng,
        })
    }

    /// Current generation snapshot.
    pub fn snapshot(&self) -> &PopulationSnapshot {
        &self.snapshot
    }

    /// Number of generations simulated so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &TransmissionConfig {
        &self.config
    }

    /// Number of variant identifiers minted so far, the founder included.
    pub fn variants_minted(&self) -> u64 {
        self.arena.minted()
    }

    /// Whether the configured number of generations has been simulated.
    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.timesteps
    }

    /// Diversity recorded so far over the statistics window.
    pub fn observed_diversity(&self) -> &[f64] {
        &self.obs_div
    }

    /// Advance simulation by one generation.
    ///
    /// Generations past `timesteps` are simulated with the bias of the final
    /// generation but are not recorded.
    pub fn step(&mut self) -> &PopulationSnapshot {
        self.generation += 1;
        let bias = self.config.bias.resolve(self.generation);

        self.snapshot = next_generation(
            &self.snapshot,
            &self.innovation,
            &bias,
            &mut self.arena,
            &mut self.rng,
        );

        let diversity = self.snapshot.simpson_diversity();
        trace!(
            generation = self.generation,
            richness = self.snapshot.richness(),
            diversity,
            "generation complete"
        );

        if self.config.in_window(self.generation) {
            self.obs_div.push(diversity);
            if let Some(history) = &mut self.history {
                history.push(self.snapshot.clone());
            }
        }

        &self.snapshot
    }

    /// Run simulation for a specific number of generations.
    pub fn run_for(&mut self, generations: usize) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Run the remaining generations up to `timesteps`.
    pub fn run(&mut self) {
        let remaining = self.config.timesteps.saturating_sub(self.generation);
        self.run_for(remaining);
    }

    /// Package the recorded statistics.
    ///
    /// The turnover estimate covers whatever part of the window has been
    /// simulated; call [`run`](Self::run) first for a complete result.
    pub fn finish(self) -> TransmissionOutput {
        let turnover = match (&self.history, self.config.top) {
            (Some(history), Some(top)) => Some(estimate_turnover(history, top)),
            _ => None,
        };
        let frequencies = if self.config.raw { self.history } else { None };
        let exp_div = self.config.expected_diversity();

        debug!(
            generations = self.generation,
            variants_minted = self.arena.minted(),
            recorded = self.obs_div.len(),
            "simulation finished"
        );

        TransmissionOutput {
            obs_div: self.obs_div,
            exp_div,
            frequencies,
            turnover,
        }
    }
}

/// Run a full transmission simulation.
///
/// Fails before any generation is simulated if the configuration is invalid.
pub fn transmission(config: &TransmissionConfig) -> Result<TransmissionOutput, ConfigError> {
    let mut sim = Simulation::new(config.clone())?;
    sim.run();
    Ok(sim.finish())
}

/// Run a simulation where every birth draws its own bias from
/// Normal(`bias_mean`, `bias_sd`).
///
/// Diversity is reported for every generation. With `bias_sd = 0` the run is
/// identical to [`transmission`] with a constant bias of `bias_mean` and the
/// same seed.
pub fn hetero_pop_transmission(config: &HeteroConfig) -> Result<HeteroOutput, ConfigError> {
    transmission(&config.to_transmission()).map(HeteroOutput::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::BiasSpec;

    fn create_test_config() -> TransmissionConfig {
        let mut config = TransmissionConfig::new(50, 0.05, 40);
        config.warm_up = 10;
        config.seed = Some(42);
        config
    }

    #[test]
    fn test_simulation_new() {
        let sim = Simulation::new(create_test_config()).unwrap();
        assert_eq!(sim.generation(), 0);
        assert!(sim.snapshot().is_monomorphic());
        assert_eq!(sim.snapshot().size(), 50);
        assert_eq!(sim.variants_minted(), 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let mut config = create_test_config();
        config.innovation_rate = 2.0;
        assert!(Simulation::new(config.clone()).is_err());
        assert!(transmission(&config).is_err());
    }

    #[test]
    fn test_simulation_step() {
        let mut sim = Simulation::new(create_test_config()).unwrap();
        let size = sim.step().size();
        assert_eq!(size, 50);
        assert_eq!(sim.generation(), 1);
        // Still in warm-up
        assert!(sim.observed_diversity().is_empty());
    }

    #[test]
    fn test_simulation_run_for_then_run() {
        let mut sim = Simulation::new(create_test_config()).unwrap();
        sim.run_for(15);
        assert_eq!(sim.generation(), 15);
        assert_eq!(sim.observed_diversity().len(), 5);

        sim.run();
        assert!(sim.is_finished());
        assert_eq!(sim.generation(), 40);
        assert_eq!(sim.observed_diversity().len(), 30);
    }

    #[test]
    fn test_steps_past_timesteps_are_not_recorded() {
        let mut sim = Simulation::new(create_test_config()).unwrap();
        sim.run_for(45);
        assert_eq!(sim.generation(), 45);
        assert_eq!(sim.finish().obs_div.len(), 30);
    }

    #[test]
    fn test_summary_only_output() {
        let out = transmission(&create_test_config()).unwrap();
        assert_eq!(out.obs_div.len(), 30);
        assert!(out.frequencies.is_none());
        assert!(out.turnover.is_none());
        assert!(out.x().is_nan());
        assert!((out.exp_div - (1.0 - 1.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_raw_output_covers_window() {
        let mut config = create_test_config();
        config.raw = true;
        let out = transmission(&config).unwrap();

        let matrix = out.frequencies.as_ref().unwrap();
        assert_eq!(matrix.generations(), 11..41);
        assert_eq!(matrix.diversity(), out.obs_div);
        assert!(out.turnover.is_none());
    }

    #[test]
    fn test_top_without_raw_hides_matrix() {
        let mut config = create_test_config();
        config.top = Some(5);
        let out = transmission(&config).unwrap();
        assert!(out.frequencies.is_none());
        assert!(out.turnover.is_some());
    }

    #[test]
    fn test_no_innovation_stays_monomorphic() {
        let mut config = create_test_config();
        config.innovation_rate = 0.0;
        config.top = Some(3);
        let out = transmission(&config).unwrap();
        assert!(out.obs_div.iter().all(|&d| d == 0.0));
        assert!(out.x().is_nan());
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut config = create_test_config();
        config.raw = true;
        config.bias = BiasSpec::Constant(0.3);
        assert_eq!(transmission(&config).unwrap(), transmission(&config).unwrap());
    }

    #[test]
    fn test_hetero_reports_every_generation() {
        let mut config = HeteroConfig::new(30, 0.0, 0.2, 0.05, 25);
        config.seed = Some(8);
        let out = hetero_pop_transmission(&config).unwrap();
        assert_eq!(out.obs_div.len(), 25);
    }
}
