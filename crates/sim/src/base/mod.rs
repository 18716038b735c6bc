//! Base types for variant bookkeeping.
//!
//! This module provides variant identities, the run-scoped arena that mints
//! them, and the per-generation population snapshot.

mod snapshot;
mod variant;

pub use snapshot::PopulationSnapshot;
pub use variant::{Variant, VariantArena};
