//! Innovation (mutation) process.
//!
//! Every birth either copies a variant from the previous generation or, with
//! probability `mu`, introduces a brand-new variant. This is the infinite
//! variants model: an innovation never recreates a variant that existed
//! before, so each event adds a fresh identifier to the run.

use crate::base::{Variant, VariantArena};
use crate::errors::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-birth innovation probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InnovationModel {
    rate: f64,
}

impl InnovationModel {
    /// Create a model with innovation probability `rate`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidInnovationRate`] unless `0 <= rate <= 1`.
    pub fn new(rate: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidInnovationRate(rate));
        }
        Ok(Self { rate })
    }

    /// No innovation at all; variants can only be lost.
    pub fn none() -> Self {
        Self { rate: 0.0 }
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Decide whether one birth is an innovation event.
    ///
    /// Always consumes exactly one draw from `rng`.
    #[inline]
    pub fn occurs<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random::<f64>() < self.rate
    }

    /// Run one birth through the innovation process, minting a new variant
    /// when an innovation occurs.
    #[inline]
    pub fn innovate<R: Rng + ?Sized>(
        &self,
        arena: &mut VariantArena,
        rng: &mut R,
    ) -> Option<Variant> {
        self.occurs(rng).then(|| arena.mint())
    }
}
