//! Sensitivity of statistics to the length of the sampling window.
//!
//! Turnover exponents estimated on short windows are noisier than those
//! estimated on long ones. These functions measure the exponent (and the
//! mean diversity) on trailing windows of several lengths.

use crate::analysis::batch::run_repetitions;
use crate::analysis::summary::Summary;
use crate::analysis::utils::mean;
use crate::error::{AnalysisError, Result};
use cultevo_sim::simulation::{FrequencyMatrix, TransmissionConfig, TransmissionOutput};
use cultevo_sim::statistics::{estimate_turnover, Turnover};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Turnover estimated on one trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowTurnover {
    /// Window length in generations
    pub window: usize,
    pub turnover: Turnover,
}

/// Turnover on the trailing `windows` of `matrix`.
///
/// A window longer than the matrix is clamped to the whole matrix.
pub fn turnover_by_window(matrix: &FrequencyMatrix, windows: &[usize], top: usize) -> Vec<WindowTurnover> {
    windows
        .iter()
        .map(|&window| WindowTurnover {
            window,
            turnover: estimate_turnover(&matrix.tail(window), top),
        })
        .collect()
}

/// Statistics of one window length pooled over repetitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub window: usize,
    /// Turnover exponent across repetitions
    pub exponent: Summary,
    /// Mean diversity over the window across repetitions
    pub diversity: Summary,
}

/// Check that every window fits in the statistics window of `config`.
pub fn check_windows(config: &TransmissionConfig, windows: &[usize]) -> Result<()> {
    let available = config.window_len();
    match windows.iter().find(|&&w| w > available) {
        Some(&window) => Err(AnalysisError::WindowTooLong { window, available }),
        None => Ok(()),
    }
}

/// Summarize the turnover exponent and mean diversity on trailing windows of
/// each length in `windows`, pooled over `outputs`.
///
/// Outputs without a frequency matrix contribute a `NaN` exponent.
pub fn summarize_windows(
    outputs: &[TransmissionOutput],
    windows: &[usize],
    top: usize,
) -> Vec<WindowSummary> {
    info!(windows = windows.len(), top, "estimating turnover by window");

    windows
        .iter()
        .map(|&window| {
            let (exponents, diversities): (Vec<f64>, Vec<f64>) = outputs
                .iter()
                .map(|out| {
                    let exponent = out
                        .frequencies
                        .as_ref()
                        .map_or(f64::NAN, |m| estimate_turnover(&m.tail(window), top).exponent());
                    let start = out.obs_div.len().saturating_sub(window);
                    (exponent, mean(&out.obs_div[start..]))
                })
                .unzip();

            WindowSummary {
                window,
                exponent: Summary::from_values(&exponents),
                diversity: Summary::from_values(&diversities),
            }
        })
        .collect()
}

/// Run `repetitions` copies of `config` and summarize the turnover exponent
/// and mean diversity on trailing windows of each length in `windows`.
///
/// Every window must fit in the statistics window of `config`.
pub fn window_sensitivity(
    config: &TransmissionConfig,
    windows: &[usize],
    top: usize,
    repetitions: usize,
    base_seed: u64,
) -> Result<Vec<WindowSummary>> {
    check_windows(config, windows)?;

    let mut raw_config = config.clone();
    raw_config.raw = true;
    raw_config.top = None;
    let outputs = run_repetitions(&raw_config, repetitions, base_seed)?;

    Ok(summarize_windows(&outputs, windows, top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cultevo_sim::base::{PopulationSnapshot, VariantArena};

    fn replacement_matrix(generations: usize) -> FrequencyMatrix {
        let mut arena = VariantArena::new();
        let rows = (0..generations)
            .map(|_| PopulationSnapshot::from_counts((0..6).map(|i| (arena.mint(), 6 - i))))
            .collect();
        FrequencyMatrix::from_rows(1, rows)
    }

    #[test]
    fn test_turnover_by_window() {
        let matrix = replacement_matrix(30);
        let result = turnover_by_window(&matrix, &[1, 5, 100], 4);
        assert_eq!(result.len(), 3);
        // A single generation has no transitions
        assert!(result[0].turnover.exponent().is_nan());
        assert!((result[1].turnover.exponent() - 1.0).abs() < 1e-12);
        assert!((result[2].turnover.exponent() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_longer_than_run_rejected() {
        let mut config = TransmissionConfig::new(50, 0.05, 100);
        config.warm_up = 60;
        let err = window_sensitivity(&config, &[10, 50], 5, 2, 1).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::WindowTooLong {
                window: 50,
                available: 40
            }
        ));
    }

    #[test]
    fn test_short_windows_are_noisier() {
        let mut config = TransmissionConfig::new(100, 0.04, 900);
        config.warm_up = 300;

        let summaries = window_sensitivity(&config, &[12, 600], 5, 24, 99).unwrap();
        let (short, long) = (&summaries[0], &summaries[1]);

        assert_eq!(long.exponent.n + long.exponent.nan_count, 24);
        assert_eq!(long.exponent.nan_count, 0);
        assert!(short.exponent.iqr > long.exponent.iqr);
        assert!(short.diversity.sd > long.diversity.sd);
    }

    #[test]
    fn test_summarize_windows_from_existing_outputs() {
        let mut config = TransmissionConfig::new(60, 0.05, 120);
        config.warm_up = 40;
        config.raw = true;
        config.top = Some(4);
        let outputs = run_repetitions(&config, 5, 12).unwrap();

        let pooled = summarize_windows(&outputs, &[20, 80], 4);
        assert_eq!(pooled.len(), 2);
        assert_eq!(pooled[1].diversity.n, 5);

        // The full-window exponent is the one the runs already report
        let full: Vec<f64> = outputs.iter().map(TransmissionOutput::x).collect();
        assert_eq!(pooled[1].exponent.n, Summary::from_values(&full).n);
        assert_eq!(pooled[1].exponent.median, Summary::from_values(&full).median);

        // Same repetitions as a fresh sensitivity run
        config.raw = false;
        config.top = None;
        let fresh = window_sensitivity(&config, &[20, 80], 4, 5, 12).unwrap();
        // NaN statistics serialize to null, so compare through JSON
        assert_eq!(
            serde_json::to_value(&fresh).unwrap(),
            serde_json::to_value(&pooled).unwrap()
        );
    }

    #[test]
    fn test_check_windows() {
        let mut config = TransmissionConfig::new(50, 0.05, 100);
        config.warm_up = 60;
        assert!(check_windows(&config, &[10, 40]).is_ok());
        assert!(check_windows(&config, &[41]).is_err());
    }
}
