//! Response of diversity to a transient bias pulse.
//!
//! A pulse run and its control share a seed and are identical until the
//! pulse starts; the per-generation difference from then on isolates the
//! effect of the pulse.

use crate::analysis::utils::mean;
use crate::error::{AnalysisError, Result};
use cultevo_sim::evolution::BiasSpec;
use cultevo_sim::simulation::{transmission, TransmissionConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Deviation of a pulse run from its control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseDeviation {
    /// Series index of the first pulsed generation
    pub onset: usize,
    /// `pulse - control` from the onset to the end of the series
    pub deviation: Vec<f64>,
    /// Most negative deviation
    pub trough: f64,
    /// Offset from the onset at which the trough occurs
    pub trough_offset: usize,
    /// Mean deviation over the final `recovery_window` entries
    pub recovery_gap: f64,
}

/// Compare a pulse series against its control from series index `onset`.
pub fn pulse_deviation(
    pulse: &[f64],
    control: &[f64],
    onset: usize,
    recovery_window: usize,
) -> Result<PulseDeviation> {
    if pulse.len() != control.len() {
        return Err(AnalysisError::LengthMismatch {
            left: pulse.len(),
            right: control.len(),
        });
    }
    if onset >= pulse.len() {
        return Err(AnalysisError::OnsetOutOfRange {
            onset,
            len: pulse.len(),
        });
    }

    let deviation: Vec<f64> = pulse[onset..]
        .iter()
        .zip(&control[onset..])
        .map(|(p, c)| p - c)
        .collect();

    let (trough_offset, trough) = deviation
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, f64::NAN));

    let tail = recovery_window.clamp(1, deviation.len());
    let recovery_gap = mean(&deviation[deviation.len() - tail..]);

    Ok(PulseDeviation {
        onset,
        deviation,
        trough,
        trough_offset,
        recovery_gap,
    })
}

/// Run `config` twice with the same seed: once with a constant `baseline`
/// bias and once with `pulse` in force for generations
/// `onset ..= onset + duration - 1` (1-based).
///
/// `config.bias` is replaced in both runs. The onset must fall inside the
/// statistics window. A seed is drawn when `config.seed` is `None`.
pub fn pulse_experiment(
    config: &TransmissionConfig,
    baseline: f64,
    pulse: f64,
    onset: usize,
    duration: usize,
    recovery_window: usize,
) -> Result<PulseDeviation> {
    let mut control = config.clone();
    control.bias = BiasSpec::Constant(baseline);
    control.seed = Some(config.seed.unwrap_or_else(rand::random));

    let mut treated = control.clone();
    treated.bias = BiasSpec::pulse(baseline, pulse, onset, duration, config.timesteps);

    if !config.in_window(onset) {
        return Err(AnalysisError::OnsetOutOfRange {
            onset,
            len: config.timesteps,
        });
    }

    info!(onset, duration, baseline, pulse, "running pulse experiment");

    let control_out = transmission(&control)?;
    let treated_out = transmission(&treated)?;

    // Series index 0 is generation warm_up + 1
    pulse_deviation(
        &treated_out.obs_div,
        &control_out.obs_div,
        onset - config.warm_up - 1,
        recovery_window,
    )
}
