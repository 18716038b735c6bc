//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use cultevo_sim::prelude::*;
//!
//! let mut config = TransmissionConfig::new(100, 0.01, 300);
//! config.warm_up = 100;
//! config.seed = Some(1);
//! let out = transmission(&config).unwrap();
//! assert_eq!(out.obs_div.len(), 200);
//! ```

pub use crate::base::{PopulationSnapshot, Variant};
pub use crate::errors::{self, BuilderError, ConfigError};
pub use crate::evolution::BiasSpec;
pub use crate::simulation::{
    hetero_pop_transmission, transmission, FrequencyMatrix, HeteroConfig, HeteroOutput,
    Simulation, SimulationBuilder, TransmissionConfig, TransmissionOutput,
};
pub use crate::statistics::{Turnover, TurnoverFit};
