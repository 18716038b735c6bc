//! Summary statistics of simulated populations.
//!
//! - **Diversity**: Simpson diversity and its neutral expectation
//! - **Turnover**: the rate at which the top-ranked variants are replaced

pub mod diversity;
pub mod turnover;
pub mod utils;

pub use diversity::{expected_neutral_diversity, max_diversity, simpson_index};
pub use turnover::{estimate_turnover, turnover_profile, Turnover, TurnoverFit};
pub use utils::mean;
