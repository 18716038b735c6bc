//! # Analysis Crate
//!
//! Tools that run many independent simulations and reduce them to the
//! statistics used to compare scenarios: repetition batches, summary
//! statistics, window-size sensitivity, bias pulses and posterior-predictive
//! runs.

pub mod analysis;
pub mod error;

pub use error::{AnalysisError, Result};
