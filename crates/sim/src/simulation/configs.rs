//! Run configuration.
//!
//! Both configuration structs deserialize from JSON so a run can be fully
//! reproduced from a file.

use crate::errors::ConfigError;
use crate::evolution::BiasSpec;
use crate::statistics::expected_neutral_diversity;
use serde::{Deserialize, Serialize};

/// Configuration of a [`transmission`](crate::simulation::transmission) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionConfig {
    /// Number of individuals, fixed across generations
    pub population_size: usize,
    /// Per-birth innovation probability `mu`
    pub innovation_rate: f64,
    /// Total simulated generations, warm-up included
    pub timesteps: usize,
    /// Leading generations simulated but excluded from statistics
    #[serde(default)]
    pub warm_up: usize,
    /// Copy-selection bias
    #[serde(default)]
    pub bias: BiasSpec,
    /// Expose the frequency history of the statistics window
    #[serde(default)]
    pub raw: bool,
    /// List size for turnover estimation; no estimate when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
    /// RNG seed; a fresh seed is drawn when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl TransmissionConfig {
    /// Neutral, summary-only configuration without warm-up.
    pub fn new(population_size: usize, innovation_rate: f64, timesteps: usize) -> Self {
        Self {
            population_size,
            innovation_rate,
            timesteps,
            warm_up: 0,
            bias: BiasSpec::default(),
            raw: false,
            top: None,
            seed: None,
        }
    }

    /// Check every parameter. Runs are only ever started from a validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 1 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.innovation_rate) {
            return Err(ConfigError::InvalidInnovationRate(self.innovation_rate));
        }
        if self.timesteps <= self.warm_up {
            return Err(ConfigError::EmptyWindow {
                timesteps: self.timesteps,
                warm_up: self.warm_up,
            });
        }
        self.bias.validate(self.timesteps)?;
        if self.top == Some(0) {
            return Err(ConfigError::InvalidTop(0));
        }
        Ok(())
    }

    /// Expected Simpson diversity under neutral copying for this `N` and `mu`.
    pub fn expected_diversity(&self) -> f64 {
        expected_neutral_diversity(self.population_size, self.innovation_rate)
    }

    /// Number of generations in the statistics window.
    pub fn window_len(&self) -> usize {
        self.timesteps.saturating_sub(self.warm_up)
    }

    /// Whether generation `generation` (1-based) falls in the statistics window.
    pub fn in_window(&self, generation: usize) -> bool {
        generation > self.warm_up && generation <= self.timesteps
    }

    /// Whether the run must keep its frequency history.
    pub(crate) fn records_history(&self) -> bool {
        self.raw || self.top.is_some()
    }
}

/// Configuration of a [`hetero_pop_transmission`](crate::simulation::hetero_pop_transmission) run.
///
/// Every birth draws its own bias from Normal(`bias_mean`, `bias_sd`). There
/// is no warm-up: diversity is reported for every generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeteroConfig {
    pub population_size: usize,
    pub bias_mean: f64,
    pub bias_sd: f64,
    pub innovation_rate: f64,
    pub timesteps: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl HeteroConfig {
    pub fn new(
        population_size: usize,
        bias_mean: f64,
        bias_sd: f64,
        innovation_rate: f64,
        timesteps: usize,
    ) -> Self {
        Self {
            population_size,
            bias_mean,
            bias_sd,
            innovation_rate,
            timesteps,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_transmission().validate()
    }

    /// The equivalent [`TransmissionConfig`]: heterogeneous bias, no warm-up,
    /// summary output only.
    pub fn to_transmission(&self) -> TransmissionConfig {
        TransmissionConfig {
            population_size: self.population_size,
            innovation_rate: self.innovation_rate,
            timesteps: self.timesteps,
            warm_up: 0,
            bias: BiasSpec::Heterogeneous {
                mean: self.bias_mean,
                sd: self.bias_sd,
            },
            raw: false,
            top: None,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransmissionConfig::new(100, 0.01, 50);
        assert!(config.validate().is_ok());
        assert_eq!(config.warm_up, 0);
        assert_eq!(config.bias, BiasSpec::Constant(0.0));
        assert!(!config.records_history());
        assert_eq!(config.window_len(), 50);
    }

    #[test]
    fn test_population_size_must_be_positive() {
        let config = TransmissionConfig::new(0, 0.01, 10);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPopulationSize(0)));
    }

    #[test]
    fn test_innovation_rate_bounds() {
        for mu in [-0.1, 1.01, f64::NAN] {
            let config = TransmissionConfig::new(10, mu, 10);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidInnovationRate(_))
            ));
        }
        assert!(TransmissionConfig::new(10, 0.0, 10).validate().is_ok());
        assert!(TransmissionConfig::new(10, 1.0, 10).validate().is_ok());
    }

    #[test]
    fn test_window_must_be_non_empty() {
        let mut config = TransmissionConfig::new(10, 0.1, 100);
        config.warm_up = 100;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyWindow {
                timesteps: 100,
                warm_up: 100
            })
        );
        config.warm_up = 99;
        assert!(config.validate().is_ok());
        assert!(!config.in_window(99));
        assert!(config.in_window(100));
    }

    #[test]
    fn test_schedule_must_cover_run() {
        let mut config = TransmissionConfig::new(10, 0.1, 5);
        config.bias = BiasSpec::Schedule(vec![0.0; 4]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ScheduleLength {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_top_must_be_positive() {
        let mut config = TransmissionConfig::new(10, 0.1, 5);
        config.top = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTop(0)));
        config.top = Some(3);
        assert!(config.validate().is_ok());
        assert!(config.records_history());
    }

    #[test]
    fn test_hetero_negative_sd_rejected() {
        let config = HeteroConfig::new(100, 0.0, -0.5, 0.01, 100);
        assert_eq!(config.validate(), Err(ConfigError::InvalidBiasSpread(-0.5)));
    }

    #[test]
    fn test_hetero_to_transmission() {
        let mut hetero = HeteroConfig::new(100, 0.2, 0.1, 0.01, 300);
        hetero.seed = Some(4);
        let config = hetero.to_transmission();
        assert_eq!(config.warm_up, 0);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.bias, BiasSpec::Heterogeneous { mean: 0.2, sd: 0.1 });
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "population_size": 500,
            "innovation_rate": 0.005,
            "timesteps": 2000,
            "warm_up": 500,
            "bias": {"schedule": [0.0, 0.5]}
        }"#;
        let config: TransmissionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.warm_up, 500);
        assert!(!config.raw);
        assert_eq!(config.top, None);
        assert_eq!(config.bias, BiasSpec::Schedule(vec![0.0, 0.5]));
        // Schedule length does not match timesteps
        assert!(config.validate().is_err());
    }
}
