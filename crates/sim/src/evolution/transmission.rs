//! The generation step: copying, bias and innovation.
//!
//! Each of the N births of a new generation independently
//! 1. innovates with probability `mu`, minting a brand-new variant, or
//! 2. copies a variant of the previous generation, picked with probability
//!    proportional to `count^(1+b)`.
//!
//! Per birth the random stream is consumed in a fixed order: one draw for the
//! innovation decision, then (when copying) one normal draw if the bias is
//! per-birth, then one draw for the weighted pick.

use super::{GenerationBias, InnovationModel};
use crate::base::{PopulationSnapshot, Variant, VariantArena};
use rand::Rng;

/// Cumulative copy-selection weights over the variants of one snapshot.
#[derive(Debug, Clone)]
pub struct CopyDistribution {
    cumulative: Vec<f64>,
}

impl CopyDistribution {
    /// Build the distribution for `counts` under bias `bias`.
    ///
    /// Weights are `(c / c_ref)^(1+b)` where `c_ref` is the largest count for
    /// a non-negative exponent and the smallest positive count otherwise. This
    /// rescaling leaves the probabilities unchanged while keeping the heaviest
    /// weight at exactly 1, so strong biases cannot overflow. Zero counts
    /// carry zero weight regardless of the exponent.
    pub fn new(counts: &[usize], bias: f64) -> Self {
        let exponent = 1.0 + bias;
        let reference = if exponent >= 0.0 {
            counts.iter().copied().max()
        } else {
            counts.iter().copied().filter(|&c| c > 0).min()
        }
        .unwrap_or(0) as f64;

        let cumulative = counts
            .iter()
            .scan(0.0, |acc, &c| {
                *acc += weight(c, reference, exponent);
                Some(*acc)
            })
            .collect();

        Self { cumulative }
    }

    /// Sum of all weights. Zero only when every count is zero.
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Selection probability of each entry.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total();
        let mut previous = 0.0;
        self.cumulative
            .iter()
            .map(|&c| {
                let p = (c - previous) / total;
                previous = c;
                p
            })
            .collect()
    }

    /// Pick an entry index. Entries with zero weight are never returned.
    ///
    /// The distribution must have a positive total.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r = rng.random::<f64>() * self.total();
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len() - 1)
    }
}

#[inline]
fn weight(count: usize, reference: f64, exponent: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let w = (count as f64 / reference).powf(exponent);
    if w.is_finite() {
        w
    } else {
        0.0
    }
}

/// Advance `previous` by one generation.
///
/// Returns the new snapshot; the population size is conserved. Innovations
/// are minted from `arena`, which must be the arena that minted every variant
/// in `previous`.
pub fn next_generation<R: Rng + ?Sized>(
    previous: &PopulationSnapshot,
    innovation: &InnovationModel,
    bias: &GenerationBias,
    arena: &mut VariantArena,
    rng: &mut R,
) -> PopulationSnapshot {
    let counts = previous.counts();
    let mut tallies = vec![0usize; counts.len()];
    let mut innovations: Vec<Variant> = Vec::new();

    // A fixed bias shares one distribution across all births
    let shared = bias.fixed().map(|b| CopyDistribution::new(&counts, b));

    for _ in 0..previous.size() {
        if let Some(variant) = innovation.innovate(arena, rng) {
            innovations.push(variant);
            continue;
        }

        let idx = match &shared {
            Some(dist) => dist.sample(rng),
            None => {
                let b = bias.draw(rng);
                CopyDistribution::new(&counts, b).sample(rng)
            }
        };
        tallies[idx] += 1;
    }

    PopulationSnapshot::from_tallies(previous, &tallies, innovations)
}
