//! Evolution module providing the cultural transmission process.
//!
//! - **Innovation**: brand-new variants enter at a per-birth rate `mu`
//! - **Bias**: frequency-dependent skew of copy selection (conformist or anti-conformist)
//! - **Transmission**: the generation step combining copying, bias and innovation

pub mod bias;
pub mod innovation;
pub mod transmission;

pub use bias::{BiasSpec, GenerationBias};
pub use innovation::InnovationModel;
pub use transmission::{next_generation, CopyDistribution};
