//! Simulation engine and run configuration.
//!
//! The most commonly used simulation types are re-exported here for
//! convenience so consumers can import them from `cultevo_sim::simulation`.
//!
//! - `Simulation`: the engine that drives generations and records statistics.
//! - `SimulationBuilder`: fluent builder for constructing `Simulation` instances
//!   with sensible defaults and validation.
//! - `transmission` / `hetero_pop_transmission`: one-call runs.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod frequency;
pub mod output;

pub use builder::SimulationBuilder;
pub use configs::{HeteroConfig, TransmissionConfig};
pub use engine::{hetero_pop_transmission, transmission, Simulation};
pub use frequency::FrequencyMatrix;
pub use output::{HeteroOutput, TransmissionOutput};
