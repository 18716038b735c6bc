//! Utility functions for analysis module
//!
//! Shared helper functions used across analysis submodules.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

pub use cultevo_sim::statistics::mean;

/// Sample variance (denominator `n - 1`). Zero for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean_val = mean(values);
    values.iter().map(|v| (v - mean_val).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Quantile `q` of already sorted values, interpolating linearly between
/// order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Independent random streams for `count` repetitions.
///
/// Stream `i` is the generator seeded from `base_seed` advanced by `i` jumps
/// of 2^128 steps, so streams never overlap and stream `i` does not depend
/// on how many repetitions are requested.
pub fn repetition_streams(base_seed: u64, count: usize) -> Vec<Xoshiro256PlusPlus> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(base_seed);
    (0..count)
        .map(|_| {
            let stream = rng.clone();
            rng.jump();
            stream
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_variance() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&values).sqrt() - 2.138).abs() < 0.01);
        assert_eq!(variance(&[3.0]), 0.0);
    }

    #[test]
    fn test_quantile() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&sorted, 0.5), 3.0);
        assert_eq!(quantile(&sorted, 0.25), 2.0);
        assert_eq!(quantile(&sorted, 1.0), 5.0);

        let even = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&even, 0.5), 2.5);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_streams_are_prefix_stable() {
        let mut short = repetition_streams(9, 2);
        let mut long = repetition_streams(9, 5);
        assert_eq!(short[1].random::<u64>(), long[1].random::<u64>());

        let a: u64 = long[0].random();
        let b: u64 = long[2].random();
        assert_ne!(a, b);
        assert_eq!(short.len(), 2);
    }
}
