//! Frequency-dependent copying bias.
//!
//! A bias `b` skews copy selection away from plain proportional copying: a
//! variant held by `c` individuals is picked with weight `c^(1+b)`.
//!
//! - `b = 0`: neutral copying (pure drift)
//! - `b > 0`: conformist, common variants are over-copied
//! - `b < 0`: anti-conformist, common variants are under-copied
//!
//! A [`BiasSpec`] describes how `b` is chosen over a whole run and is resolved
//! once per generation into a [`GenerationBias`], which the generation step
//! consumes without caring which shape the caller configured.

use crate::errors::ConfigError;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// How the bias coefficient is chosen across a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasSpec {
    /// One coefficient shared by every generation and individual.
    Constant(f64),

    /// One coefficient per generation; entry `t - 1` applies to generation `t`.
    Schedule(Vec<f64>),

    /// Every birth draws its own coefficient from Normal(mean, sd).
    Heterogeneous { mean: f64, sd: f64 },
}

impl Default for BiasSpec {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl BiasSpec {
    /// Unbiased copying.
    pub fn neutral() -> Self {
        Self::Constant(0.0)
    }

    /// Build a schedule from `(bias, generations)` runs.
    ///
    /// ```
    /// use cultevo_sim::evolution::BiasSpec;
    ///
    /// let bias = BiasSpec::from_runs(&[(0.0, 3), (0.5, 2)]);
    /// assert_eq!(bias, BiasSpec::Schedule(vec![0.0, 0.0, 0.0, 0.5, 0.5]));
    /// ```
    pub fn from_runs(runs: &[(f64, usize)]) -> Self {
        let schedule = runs
            .iter()
            .flat_map(|&(bias, len)| std::iter::repeat(bias).take(len))
            .collect();
        Self::Schedule(schedule)
    }

    /// A transient intervention: `baseline` everywhere except generations
    /// `onset ..= onset + duration - 1` (1-based), which use `pulse`.
    pub fn pulse(baseline: f64, pulse: f64, onset: usize, duration: usize, timesteps: usize) -> Self {
        let schedule = (1..=timesteps)
            .map(|t| {
                if t >= onset && t < onset.saturating_add(duration) {
                    pulse
                } else {
                    baseline
                }
            })
            .collect();
        Self::Schedule(schedule)
    }

    /// Check the bias against a run of `timesteps` generations.
    pub fn validate(&self, timesteps: usize) -> Result<(), ConfigError> {
        match self {
            Self::Constant(b) => check_finite(*b),
            Self::Schedule(schedule) => {
                if schedule.len() != timesteps {
                    return Err(ConfigError::ScheduleLength {
                        expected: timesteps,
                        found: schedule.len(),
                    });
                }
                schedule.iter().try_for_each(|&b| check_finite(b))
            }
            Self::Heterogeneous { mean, sd } => {
                check_finite(*mean)?;
                if !sd.is_finite() || *sd < 0.0 {
                    return Err(ConfigError::InvalidBiasSpread(*sd));
                }
                Ok(())
            }
        }
    }

    /// Resolve the bias for 1-based `generation`.
    ///
    /// Generations past the end of a schedule keep its final value.
    /// A heterogeneous bias with zero spread resolves to a fixed bias, so it
    /// consumes the random stream exactly like the equivalent constant bias.
    pub fn resolve(&self, generation: usize) -> GenerationBias {
        match self {
            Self::Constant(b) => GenerationBias::Fixed(*b),
            Self::Schedule(schedule) => {
                let idx = generation.saturating_sub(1).min(schedule.len().saturating_sub(1));
                GenerationBias::Fixed(schedule.get(idx).copied().unwrap_or(0.0))
            }
            Self::Heterogeneous { mean, sd } => {
                if *sd == 0.0 {
                    GenerationBias::Fixed(*mean)
                } else {
                    GenerationBias::PerBirth {
                        mean: *mean,
                        sd: *sd,
                    }
                }
            }
        }
    }

    /// Short label used in logs and reports.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Schedule(_) => "schedule",
            Self::Heterogeneous { .. } => "heterogeneous",
        }
    }

    /// Mean bias over the first `timesteps` generations.
    pub fn mean(&self, timesteps: usize) -> f64 {
        match self {
            Self::Constant(b) => *b,
            Self::Heterogeneous { mean, .. } => *mean,
            Self::Schedule(schedule) => {
                let window = &schedule[..timesteps.min(schedule.len())];
                if window.is_empty() {
                    return 0.0;
                }
                window.iter().sum::<f64>() / window.len() as f64
            }
        }
    }
}

fn check_finite(b: f64) -> Result<(), ConfigError> {
    if b.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteBias(b))
    }
}

/// The bias in force during one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationBias {
    /// Every birth of the generation uses the same coefficient.
    Fixed(f64),
    /// Every birth draws a fresh coefficient from Normal(mean, sd).
    PerBirth { mean: f64, sd: f64 },
}

impl GenerationBias {
    /// The coefficient shared by the whole generation, if there is one.
    pub fn fixed(&self) -> Option<f64> {
        match self {
            Self::Fixed(b) => Some(*b),
            Self::PerBirth { .. } => None,
        }
    }

    /// Coefficient for a single birth. Only per-birth biases consume randomness.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Fixed(b) => *b,
            Self::PerBirth { mean, sd } => {
                let z: f64 = rng.sample(StandardNormal);
                mean + sd * z
            }
        }
    }
}
