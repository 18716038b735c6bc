//! Results of a run.

use crate::simulation::FrequencyMatrix;
use crate::statistics::{mean, Turnover};
use serde::{Deserialize, Serialize};

/// Output of a [`transmission`](crate::simulation::transmission) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionOutput {
    /// Simpson diversity of generations `warm_up + 1 ..= timesteps`
    pub obs_div: Vec<f64>,
    /// Expected diversity under neutral copying, `1 - 1/(2 N mu + 1)`
    pub exp_div: f64,
    /// Frequency history of the statistics window, when `raw` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<FrequencyMatrix>,
    /// Turnover estimate, when `top` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover: Option<Turnover>,
}

impl TransmissionOutput {
    /// Turnover exponent `x`. `NaN` when not requested or not estimable.
    pub fn x(&self) -> f64 {
        self.turnover
            .as_ref()
            .map_or(f64::NAN, |turnover| turnover.exponent())
    }

    /// Mean observed diversity over the statistics window.
    pub fn mean_diversity(&self) -> f64 {
        mean(&self.obs_div)
    }

    /// Observed diversity of the final generation.
    pub fn final_diversity(&self) -> f64 {
        self.obs_div.last().copied().unwrap_or(f64::NAN)
    }
}

/// Output of a [`hetero_pop_transmission`](crate::simulation::hetero_pop_transmission) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeteroOutput {
    /// Simpson diversity of every generation `1 ..= timesteps`
    pub obs_div: Vec<f64>,
    /// Expected diversity under neutral copying
    pub exp_div: f64,
}

impl HeteroOutput {
    pub fn mean_diversity(&self) -> f64 {
        mean(&self.obs_div)
    }

    pub fn final_diversity(&self) -> f64 {
        self.obs_div.last().copied().unwrap_or(f64::NAN)
    }
}

impl From<TransmissionOutput> for HeteroOutput {
    fn from(out: TransmissionOutput) -> Self {
        Self {
            obs_div: out.obs_div,
            exp_div: out.exp_div,
        }
    }
}
