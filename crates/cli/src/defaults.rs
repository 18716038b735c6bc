//! Shared default values for run configuration.
//! Used whenever neither a flag nor a configuration file sets a value.

pub const POPULATION_SIZE: usize = 500;
pub const INNOVATION_RATE: f64 = 0.005;
pub const TIMESTEPS: usize = 2000;
pub const WARM_UP: usize = 1000;

pub const BIAS_MEAN: f64 = 0.0;
pub const BIAS_SD: f64 = 0.1;

pub const REPETITIONS: usize = 100;
pub const BATCH_SEED: u64 = 1;

pub const PULSE_BIAS: f64 = 0.5;
pub const PULSE_DURATION: usize = 10;
pub const RECOVERY_WINDOW: usize = 100;
