//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and validation.

pub use crate::errors::BuilderError;
use crate::evolution::BiasSpec;
use crate::simulation::{Simulation, TransmissionConfig};

/// Builder for constructing [`Simulation`] instances with a fluent API.
///
/// # Examples
///
/// ```
/// use cultevo_sim::simulation::SimulationBuilder;
///
/// // Neutral run with defaults
/// let sim = SimulationBuilder::new()
///     .population_size(100)
///     .innovation_rate(0.01)
///     .timesteps(200)
///     .build()
///     .unwrap();
///
/// // Conformist run with warm-up, turnover and a fixed seed
/// let mut sim = SimulationBuilder::new()
///     .population_size(100)
///     .innovation_rate(0.01)
///     .timesteps(200)
///     .warm_up(100)
///     .bias(0.2)
///     .top(10)
///     .seed(42)
///     .build()
///     .unwrap();
/// sim.run();
/// let out = sim.finish();
/// assert_eq!(out.obs_div.len(), 100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    // Required parameters
    population_size: Option<usize>,
    innovation_rate: Option<f64>,
    timesteps: Option<usize>,

    // Optional parameters
    warm_up: usize,     // Default: 0
    bias: BiasSpec,     // Default: neutral
    raw: bool,          // Default: summary only
    top: Option<usize>, // Default: no turnover estimate
    seed: Option<u64>,  // Default: None (random)
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size (required).
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the per-birth innovation rate (required).
    pub fn innovation_rate(mut self, rate: f64) -> Self {
        self.innovation_rate = Some(rate);
        self
    }

    /// Set the total number of generations, warm-up included (required).
    pub fn timesteps(mut self, timesteps: usize) -> Self {
        self.timesteps = Some(timesteps);
        self
    }

    /// Set the number of leading generations excluded from statistics.
    pub fn warm_up(mut self, warm_up: usize) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Use one bias for every generation.
    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = BiasSpec::Constant(bias);
        self
    }

    /// Use one bias per generation. Must cover every generation.
    pub fn bias_schedule(mut self, schedule: Vec<f64>) -> Self {
        self.bias = BiasSpec::Schedule(schedule);
        self
    }

    /// Draw a fresh bias for every birth from Normal(`mean`, `sd`).
    pub fn heterogeneous_bias(mut self, mean: f64, sd: f64) -> Self {
        self.bias = BiasSpec::Heterogeneous { mean, sd };
        self
    }

    /// Set the bias specification directly.
    pub fn bias_spec(mut self, bias: BiasSpec) -> Self {
        self.bias = bias;
        self
    }

    /// Expose the frequency history of the statistics window.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Estimate the turnover exponent over list sizes `1..=top`.
    pub fn top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }

    /// Set random seed for reproducibility.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Assemble and validate the configuration without creating a simulation.
    pub fn build_config(self) -> Result<TransmissionConfig, BuilderError> {
        let config = TransmissionConfig {
            population_size: self
                .population_size
                .ok_or(BuilderError::MissingRequired("population_size"))?,
            innovation_rate: self
                .innovation_rate
                .ok_or(BuilderError::MissingRequired("innovation_rate"))?,
            timesteps: self
                .timesteps
                .ok_or(BuilderError::MissingRequired("timesteps"))?,
            warm_up: self.warm_up,
            bias: self.bias,
            raw: self.raw,
            top: self.top,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        let config = self.build_config()?;
        Ok(Simulation::new(config)?)
    }
}
