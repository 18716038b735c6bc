//! Numeric helpers shared by the statistics and their consumers.

/// Arithmetic mean. `NaN` when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
