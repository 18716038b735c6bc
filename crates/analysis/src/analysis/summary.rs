//! Summary statistics over repetitions.
//!
//! Results of repetitions are pooled into an unordered empirical
//! distribution. `NaN` values (e.g. turnover exponents that could not be
//! estimated) are skipped and counted separately.

use crate::analysis::utils::{mean, quantile, variance};
use cultevo_sim::simulation::{HeteroOutput, TransmissionOutput};
use serde::{Deserialize, Serialize};

/// Location and spread of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of non-`NaN` values summarized, infinities included
    pub n: usize,
    /// Number of `NaN` values skipped
    pub nan_count: usize,
    pub mean: f64,
    /// Sample variance (`n - 1` denominator)
    pub variance: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
    /// Interquartile range `q75 - q25`
    pub iqr: f64,
}

impl Summary {
    /// Summarize `values`. Every statistic is `NaN` when every value is `NaN`.
    pub fn from_values(values: &[f64]) -> Self {
        let mut kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let nan_count = values.len() - kept.len();
        kept.sort_by(f64::total_cmp);

        if kept.is_empty() {
            return Self {
                n: 0,
                nan_count,
                mean: f64::NAN,
                variance: f64::NAN,
                sd: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                median: f64::NAN,
                q25: f64::NAN,
                q75: f64::NAN,
                iqr: f64::NAN,
            };
        }

        let var = variance(&kept);
        let q25 = quantile(&kept, 0.25);
        let q75 = quantile(&kept, 0.75);
        Self {
            n: kept.len(),
            nan_count,
            mean: mean(&kept),
            variance: var,
            sd: var.sqrt(),
            min: kept[0],
            max: kept[kept.len() - 1],
            median: quantile(&kept, 0.5),
            q25,
            q75,
            iqr: q75 - q25,
        }
    }
}

/// Pooled statistics of a batch of [`TransmissionOutput`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub repetitions: usize,
    /// Expected neutral diversity shared by every repetition
    pub exp_div: f64,
    /// Per-repetition mean diversity over the statistics window
    pub mean_diversity: Summary,
    /// Per-repetition diversity of the last generation
    pub final_diversity: Summary,
    /// Per-repetition turnover exponent
    pub turnover: Summary,
}

impl BatchSummary {
    pub fn from_outputs(outputs: &[TransmissionOutput]) -> Self {
        let means: Vec<f64> = outputs.iter().map(TransmissionOutput::mean_diversity).collect();
        let finals: Vec<f64> = outputs.iter().map(TransmissionOutput::final_diversity).collect();
        let exponents: Vec<f64> = outputs.iter().map(TransmissionOutput::x).collect();
        Self {
            repetitions: outputs.len(),
            exp_div: outputs.first().map_or(f64::NAN, |out| out.exp_div),
            mean_diversity: Summary::from_values(&means),
            final_diversity: Summary::from_values(&finals),
            turnover: Summary::from_values(&exponents),
        }
    }

    pub fn from_hetero_outputs(outputs: &[HeteroOutput]) -> Self {
        let means: Vec<f64> = outputs.iter().map(HeteroOutput::mean_diversity).collect();
        let finals: Vec<f64> = outputs.iter().map(HeteroOutput::final_diversity).collect();
        Self {
            repetitions: outputs.len(),
            exp_div: outputs.first().map_or(f64::NAN, |out| out.exp_div),
            mean_diversity: Summary::from_values(&means),
            final_diversity: Summary::from_values(&finals),
            turnover: Summary::from_values(&[]),
        }
    }
}

/// Per-generation mean diversity across repetitions of equal length.
pub fn mean_trajectory(series: &[Vec<f64>]) -> Vec<f64> {
    let len = series.iter().map(Vec::len).min().unwrap_or(0);
    (0..len)
        .map(|t| series.iter().map(|s| s[t]).sum::<f64>() / series.len() as f64)
        .collect()
}
