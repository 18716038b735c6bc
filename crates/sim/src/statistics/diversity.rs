//! Diversity metrics for variant frequency data
//!
//! Implements:
//! - Simpson diversity of a single snapshot
//! - The expected diversity under neutral copying (infinite variants model)

/// Calculate Simpson's diversity index
///
/// Returns the probability that two individuals drawn with replacement hold
/// different variants.
///
/// # Formula
///
/// $$D = 1 - \sum_{i} p_i^2$$
///
/// where $p_i$ is the proportion of variant $i$.
///
/// # Returns
///
/// A value in `[0, 1 - 1/N]`, zero only for a monomorphic population.
/// `NaN` when the counts sum to zero, since proportions are undefined.
pub fn simpson_index(counts: &[usize]) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return f64::NAN;
    }

    let n = n as f64;
    let sum_squared_freqs: f64 = counts
        .iter()
        .map(|&count| {
            let freq = count as f64 / n;
            freq * freq
        })
        .sum();

    // Guard against rounding pushing a monomorphic sample just below zero
    (1.0 - sum_squared_freqs).max(0.0)
}

/// Expected Simpson diversity under neutral copying
///
/// # Formula
///
/// $$E[D] = 1 - \frac{1}{2N\mu + 1}$$
///
/// # References
///
/// Kimura, M., & Crow, J. F. (1964). The number of alleles that can be
/// maintained in a finite population. Genetics, 49(4), 725-738.
pub fn expected_neutral_diversity(population_size: usize, innovation_rate: f64) -> f64 {
    let theta = 2.0 * population_size as f64 * innovation_rate;
    1.0 - 1.0 / (theta + 1.0)
}

/// Largest Simpson diversity attainable with `population_size` individuals.
pub fn max_diversity(population_size: usize) -> f64 {
    if population_size == 0 {
        return f64::NAN;
    }
    1.0 - 1.0 / population_size as f64
}
