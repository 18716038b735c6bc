//! Turnover of the top-ranked variants.
//!
//! For a list size `y`, the turnover `z_t(y)` of generation `t` is the number
//! of variants on generation `t`'s top-`y` list that were not on generation
//! `t-1`'s top-`y` list. Averaged over a window, turnover grows with list size
//! roughly as a power law `z(y) ∝ y^x`; under neutral copying the exponent
//! `x` sits near 0.86.
//!
//! The exponent is the least-squares slope of `ln z(y)` on `ln y` over list
//! sizes `1..=top` with non-zero mean turnover. A window holding fewer than
//! `top` distinct variants cannot fill the largest list and yields no
//! estimate.
//!
//! # References
//!
//! Bentley, R. A., Lipo, C. P., Herzog, H. A., & Hahn, M. W. (2007). Regular
//! rates of popular culture change reflect random copying. Evolution and
//! Human Behavior, 28(3), 151-158.

use crate::base::Variant;
use crate::simulation::FrequencyMatrix;
use serde::{Deserialize, Serialize};

/// A fitted turnover power law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverFit {
    /// Fitted exponent `x`
    pub exponent: f64,
    /// Fitted `ln` of the prefactor
    pub intercept: f64,
    /// Coefficient of determination on the log-log scale
    pub r_squared: f64,
    /// List sizes that entered the regression
    pub list_sizes: Vec<usize>,
    /// Mean turnover for each entry of `list_sizes`
    pub mean_turnover: Vec<f64>,
}

/// Outcome of turnover estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turnover {
    Estimated(TurnoverFit),
    /// The window was too short, held fewer than `top` distinct variants, or
    /// fewer than two list sizes showed any turnover.
    InsufficientData { usable_sizes: usize },
}

impl Turnover {
    /// The exponent, or `NaN` when there was not enough data.
    pub fn exponent(&self) -> f64 {
        match self {
            Self::Estimated(fit) => fit.exponent,
            Self::InsufficientData { .. } => f64::NAN,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, Self::Estimated(_))
    }

    pub fn fit(&self) -> Option<&TurnoverFit> {
        match self {
            Self::Estimated(fit) => Some(fit),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Mean turnover `z(y)` for `y = 1..=top` across consecutive rows of `matrix`.
///
/// Returns an empty vector when the matrix has fewer than two rows.
pub fn turnover_profile(matrix: &FrequencyMatrix, top: usize) -> Vec<f64> {
    if matrix.len() < 2 || top == 0 {
        return Vec::new();
    }

    let lists: Vec<Vec<Variant>> = matrix
        .rows()
        .iter()
        .map(|row| row.ranked().into_iter().take(top).map(|(v, _)| v).collect())
        .collect();

    // diff[y] accumulates the turnover of list size y+1 through a difference array
    let mut diff = vec![0i64; top + 1];
    for pair in lists.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        for (rank, variant) in current.iter().enumerate() {
            // The variant is new to list sizes rank+1 ..= previous rank
            let previous_rank = previous
                .iter()
                .position(|v| v == variant)
                .unwrap_or(top);
            if previous_rank > rank {
                diff[rank] += 1;
                diff[previous_rank] -= 1;
            }
        }
    }

    let transitions = (lists.len() - 1) as f64;
    let mut running = 0i64;
    diff[..top]
        .iter()
        .map(|&d| {
            running += d;
            running as f64 / transitions
        })
        .collect()
}

/// Estimate the turnover exponent over every row of `matrix`.
pub fn estimate_turnover(matrix: &FrequencyMatrix, top: usize) -> Turnover {
    if matrix.variants().len() < top {
        return Turnover::InsufficientData { usable_sizes: 0 };
    }
    let profile = turnover_profile(matrix, top);

    let (list_sizes, mean_turnover): (Vec<usize>, Vec<f64>) = profile
        .iter()
        .enumerate()
        .filter(|(_, &z)| z > 0.0)
        .map(|(i, &z)| (i + 1, z))
        .unzip();

    if list_sizes.len() < 2 {
        return Turnover::InsufficientData {
            usable_sizes: list_sizes.len(),
        };
    }

    let xs: Vec<f64> = list_sizes.iter().map(|&y| (y as f64).ln()).collect();
    let ys: Vec<f64> = mean_turnover.iter().map(|z| z.ln()).collect();
    let (exponent, intercept, r_squared) = least_squares(&xs, &ys);

    Turnover::Estimated(TurnoverFit {
        exponent,
        intercept,
        r_squared,
        list_sizes,
        mean_turnover,
    })
}

/// Ordinary least squares of `ys` on `xs`: `(slope, intercept, r²)`.
fn least_squares(xs: &[f64], ys: &[f64]) -> (f64, f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let syy: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
    let sxy: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A perfectly flat response is perfectly explained by a zero slope
    let r_squared = if syy == 0.0 { 1.0 } else { sxy * sxy / (sxx * syy) };

    (slope, intercept, r_squared)
}
