use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a cultural variant.
///
/// Identifiers are minted in increasing order by a [`VariantArena`], so the
/// derived ordering is the order in which variants first appeared in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variant(u64);

impl Variant {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Run-scoped allocator of variant identifiers.
///
/// Identifiers are never reused. Variants that drop out of the population are
/// simply no longer referenced by any snapshot; nothing needs reclaiming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantArena {
    /// Next identifier to hand out.
    next: u64,
}

impl VariantArena {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocates a variant that has never been seen before in this arena.
    #[inline]
    pub fn mint(&mut self) -> Variant {
        let variant = Variant(self.next);
        self.next += 1;
        variant
    }

    /// Number of identifiers handed out so far.
    pub fn minted(&self) -> u64 {
        self.next
    }
}
