//! # Simulation Crate
//!
//! The `sim` crate provides the cultural transmission engine. It includes
//! modules for variant bookkeeping, the transmission process (copying, bias
//! and innovation), the simulation loop and the statistics computed on its
//! output.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod prelude;
pub mod simulation;
pub mod statistics;

pub use simulation::{hetero_pop_transmission, transmission};
