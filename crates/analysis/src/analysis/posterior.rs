//! Posterior-predictive simulation over precomputed bias posteriors.
//!
//! Posterior samples of the bias parameter come from an external inference
//! pipeline and are consumed here as plain numeric columns:
//!
//! - `equilibrium`: a single bias for the whole run
//! - `variable_population`: a single bias, population size varying
//! - `phases`: seven phase-indexed biases for the variable population and
//!   transmission model; draw `i` of every phase belongs to the same
//!   posterior sample

use crate::analysis::batch::run_configs;
use crate::analysis::summary::Summary;
use crate::error::{AnalysisError, Result};
use cultevo_sim::evolution::BiasSpec;
use cultevo_sim::simulation::{TransmissionConfig, TransmissionOutput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Number of phases of the phased transmission model.
pub const PHASE_COUNT: usize = 7;

/// One column of a [`BiasPosterior`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosteriorColumn {
    Equilibrium,
    VariablePopulation,
    /// Phase index `0..PHASE_COUNT`
    Phase(usize),
}

impl fmt::Display for PosteriorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equilibrium => write!(f, "equilibrium"),
            Self::VariablePopulation => write!(f, "variable_population"),
            Self::Phase(i) => write!(f, "phase_{}", i + 1),
        }
    }
}

impl FromStr for PosteriorColumn {
    type Err = String;

    /// Parse the [`Display`](fmt::Display) form back, e.g. `phase_3`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "equilibrium" => Ok(Self::Equilibrium),
            "variable_population" => Ok(Self::VariablePopulation),
            _ => s
                .strip_prefix("phase_")
                .and_then(|k| k.parse::<usize>().ok())
                .filter(|k| (1..=PHASE_COUNT).contains(k))
                .map(|k| Self::Phase(k - 1))
                .ok_or_else(|| format!("unknown posterior column '{s}'")),
        }
    }
}

/// Posterior samples of the bias parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasPosterior {
    pub equilibrium: Vec<f64>,
    pub variable_population: Vec<f64>,
    pub phases: Vec<Vec<f64>>,
}

impl BiasPosterior {
    /// Assemble and validate a posterior.
    pub fn new(equilibrium: Vec<f64>, variable_population: Vec<f64>, phases: Vec<Vec<f64>>) -> Result<Self> {
        let posterior = Self {
            equilibrium,
            variable_population,
            phases,
        };
        posterior.validate()?;
        Ok(posterior)
    }

    /// Check that no column is empty and that every phase has the same
    /// number of draws.
    pub fn validate(&self) -> Result<()> {
        if self.phases.len() != PHASE_COUNT {
            return Err(AnalysisError::PhaseCount {
                expected: PHASE_COUNT,
                found: self.phases.len(),
            });
        }
        for column in self.columns() {
            if self.column(column)?.is_empty() {
                return Err(AnalysisError::EmptyPosterior(column.to_string()));
            }
        }
        let expected = self.phases[0].len();
        for (phase, draws) in self.phases.iter().enumerate() {
            if draws.len() != expected {
                return Err(AnalysisError::PhaseDraws {
                    phase,
                    expected,
                    found: draws.len(),
                });
            }
        }
        Ok(())
    }

    /// Every column, in display order.
    pub fn columns(&self) -> impl Iterator<Item = PosteriorColumn> {
        [PosteriorColumn::Equilibrium, PosteriorColumn::VariablePopulation]
            .into_iter()
            .chain((0..self.phases.len()).map(PosteriorColumn::Phase))
    }

    pub fn column(&self, column: PosteriorColumn) -> Result<&[f64]> {
        match column {
            PosteriorColumn::Equilibrium => Ok(&self.equilibrium),
            PosteriorColumn::VariablePopulation => Ok(&self.variable_population),
            PosteriorColumn::Phase(i) => self.phases.get(i).map(Vec::as_slice).ok_or(
                AnalysisError::PhaseCount {
                    expected: PHASE_COUNT,
                    found: self.phases.len(),
                },
            ),
        }
    }

    /// Number of joint draws of the phased model.
    pub fn phase_draws(&self) -> usize {
        self.phases.first().map_or(0, Vec::len)
    }

    /// Summary of every column.
    pub fn summarize(&self) -> Result<Vec<(PosteriorColumn, Summary)>> {
        self.columns()
            .map(|column| Ok((column, Summary::from_values(self.column(column)?))))
            .collect()
    }

    /// Per-generation bias schedule of phased draw `draw`: phase `k` holds
    /// for `phase_lengths[k]` generations.
    pub fn phase_schedule(&self, draw: usize, phase_lengths: &[usize]) -> Result<BiasSpec> {
        if phase_lengths.len() != self.phases.len() {
            return Err(AnalysisError::PhaseCount {
                expected: self.phases.len(),
                found: phase_lengths.len(),
            });
        }
        let draws = self.phase_draws();
        if draw >= draws {
            return Err(AnalysisError::DrawOutOfRange { draw, draws });
        }

        let runs: Vec<(f64, usize)> = self
            .phases
            .iter()
            .zip(phase_lengths)
            .map(|(phase, &len)| (phase[draw], len))
            .collect();
        Ok(BiasSpec::from_runs(&runs))
    }
}

/// One run per draw of `column`, each with that draw as its constant bias.
///
/// Outputs are in draw order; draw `i` runs on stream `i` of `base_seed`.
pub fn posterior_predictive(
    posterior: &BiasPosterior,
    column: PosteriorColumn,
    config: &TransmissionConfig,
    base_seed: u64,
) -> Result<Vec<TransmissionOutput>> {
    let draws = posterior.column(column)?;
    if draws.is_empty() {
        return Err(AnalysisError::EmptyPosterior(column.to_string()));
    }
    info!(%column, draws = draws.len(), "posterior-predictive runs");

    let configs: Vec<TransmissionConfig> = draws
        .iter()
        .map(|&b| TransmissionConfig {
            bias: BiasSpec::Constant(b),
            ..config.clone()
        })
        .collect();
    run_configs(&configs, base_seed)
}

/// One run per joint draw of the phased model. The phase lengths must add up
/// to `config.timesteps`.
pub fn phased_predictive(
    posterior: &BiasPosterior,
    phase_lengths: &[usize],
    config: &TransmissionConfig,
    base_seed: u64,
) -> Result<Vec<TransmissionOutput>> {
    let draws = posterior.phase_draws();
    if draws == 0 {
        return Err(AnalysisError::EmptyPosterior(PosteriorColumn::Phase(0).to_string()));
    }
    info!(draws, phases = phase_lengths.len(), "phased posterior-predictive runs");

    let configs = (0..draws)
        .map(|draw| {
            Ok(TransmissionConfig {
                bias: posterior.phase_schedule(draw, phase_lengths)?,
                ..config.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;
    run_configs(&configs, base_seed)
}
