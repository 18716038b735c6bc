//! Analysis tools for cultural transmission runs
//!
//! This module provides:
//! - Parallel, independently seeded repetition batches
//! - Summary statistics (mean, variance, quantiles, IQR)
//! - Window-size sensitivity of the turnover exponent
//! - Bias-pulse deviation analysis
//! - Posterior-predictive runs over precomputed bias posteriors

pub mod batch;
pub mod posterior;
pub mod pulse;
pub mod summary;
pub mod utils;
pub mod window;

// Re-export commonly used functions
pub use batch::{
    run_configs, run_hetero_repetitions, run_hetero_repetitions_with_progress, run_repetitions,
    run_repetitions_with_progress,
};
pub use posterior::{
    phased_predictive, posterior_predictive, BiasPosterior, PosteriorColumn, PHASE_COUNT,
};
pub use pulse::{pulse_deviation, pulse_experiment, PulseDeviation};
pub use summary::{mean_trajectory, BatchSummary, Summary};
pub use window::{
    check_windows, summarize_windows, turnover_by_window, window_sensitivity, WindowSummary,
    WindowTurnover,
};
