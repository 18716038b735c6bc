use crate::defaults;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cultevo_sim::evolution::BiasSpec;
use cultevo_sim::simulation::TransmissionConfig;
use std::path::PathBuf;

/// How results are written to stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    Pretty,
    /// A single JSON document
    Json,
}

/// Bias schedule given as `bias:generations` runs.
#[derive(Clone, Debug, PartialEq)]
pub struct BiasRuns(pub Vec<(f64, usize)>);

/// Parse `0:1500,0.5:10,0:490` into runs.
pub fn parse_bias_runs(s: &str) -> Result<BiasRuns, String> {
    s.split(',')
        .map(|run| {
            let (bias, len) = run
                .split_once(':')
                .ok_or_else(|| format!("expected bias:generations, got '{run}'"))?;
            let bias: f64 = bias
                .trim()
                .parse()
                .map_err(|e| format!("invalid bias '{bias}': {e}"))?;
            let len: usize = len
                .trim()
                .parse()
                .map_err(|e| format!("invalid generation count '{len}': {e}"))?;
            Ok((bias, len))
        })
        .collect::<Result<Vec<_>, String>>()
        .map(BiasRuns)
}

/// Model parameters shared by every subcommand that runs `transmission`.
///
/// Values come from `--config` when given; explicit flags override the file.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Population size N
    #[arg(short = 'n', long)]
    pub population_size: Option<usize>,

    /// Per-birth innovation rate mu
    #[arg(short = 'm', long)]
    pub innovation_rate: Option<f64>,

    /// Total generations, warm-up included
    #[arg(short = 'T', long)]
    pub timesteps: Option<usize>,

    /// Generations excluded from statistics
    #[arg(short = 'w', long)]
    pub warm_up: Option<usize>,

    /// Constant bias (positive = conformist, negative = anti-conformist)
    #[arg(short = 'b', long, allow_negative_numbers = true, conflicts_with = "schedule")]
    pub bias: Option<f64>,

    /// Per-birth bias spread; makes the bias heterogeneous around --bias
    #[arg(long, allow_negative_numbers = true, conflicts_with = "schedule")]
    pub bias_sd: Option<f64>,

    /// Per-generation bias as bias:generations runs, e.g. "0:1500,0.5:10,0:490"
    #[arg(long, value_parser = parse_bias_runs, allow_hyphen_values = true)]
    pub schedule: Option<BiasRuns>,

    /// Number of top variants for the turnover exponent
    #[arg(long)]
    pub top: Option<usize>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ModelArgs {
    /// Merge the configuration file, flags and defaults, then validate.
    pub fn resolve(&self) -> Result<TransmissionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            None => TransmissionConfig {
                warm_up: defaults::WARM_UP,
                ..TransmissionConfig::new(
                    defaults::POPULATION_SIZE,
                    defaults::INNOVATION_RATE,
                    defaults::TIMESTEPS,
                )
            },
        };

        if let Some(n) = self.population_size {
            config.population_size = n;
        }
        if let Some(mu) = self.innovation_rate {
            config.innovation_rate = mu;
        }
        if let Some(timesteps) = self.timesteps {
            config.timesteps = timesteps;
        }
        if let Some(warm_up) = self.warm_up {
            config.warm_up = warm_up;
        }
        if let Some(top) = self.top {
            config.top = Some(top);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        if let Some(BiasRuns(runs)) = &self.schedule {
            config.bias = BiasSpec::from_runs(runs);
        } else {
            match (self.bias, self.bias_sd) {
                (mean, Some(sd)) => {
                    config.bias = BiasSpec::Heterogeneous {
                        mean: mean.unwrap_or(defaults::BIAS_MEAN),
                        sd,
                    }
                }
                (Some(b), None) => config.bias = BiasSpec::Constant(b),
                (None, None) => {}
            }
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> ModelArgs {
        ModelArgs {
            config: None,
            population_size: None,
            innovation_rate: None,
            timesteps: None,
            warm_up: None,
            bias: None,
            bias_sd: None,
            schedule: None,
            top: None,
            seed: None,
        }
    }

    #[test]
    fn test_parse_bias_runs() {
        assert_eq!(
            parse_bias_runs("0:3, -0.5:2").unwrap(),
            BiasRuns(vec![(0.0, 3), (-0.5, 2)])
        );
        assert!(parse_bias_runs("0.5").is_err());
        assert!(parse_bias_runs("x:3").is_err());
        assert!(parse_bias_runs("0.1:-3").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = empty().resolve().unwrap();
        assert_eq!(config.population_size, defaults::POPULATION_SIZE);
        assert_eq!(config.warm_up, defaults::WARM_UP);
        assert_eq!(config.bias, BiasSpec::Constant(0.0));
    }

    #[test]
    fn test_heterogeneous_flags() {
        let args = ModelArgs {
            bias: Some(0.2),
            bias_sd: Some(0.1),
            ..empty()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.bias, BiasSpec::Heterogeneous { mean: 0.2, sd: 0.1 });
    }

    #[test]
    fn test_schedule_must_match_timesteps() {
        let args = ModelArgs {
            timesteps: Some(10),
            warm_up: Some(0),
            schedule: Some(BiasRuns(vec![(0.0, 4), (0.5, 5)])),
            ..empty()
        };
        assert!(args.resolve().is_err());
    }
}
