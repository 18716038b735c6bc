use super::Variant;
use crate::statistics::simpson_index;
use serde::{Deserialize, Serialize};

/// Variant counts of one generation.
///
/// Entries are kept sorted by variant identifier and only hold positive
/// counts. Because identifiers are minted in increasing order, appending the
/// innovations of a generation after the surviving variants keeps the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    entries: Vec<(Variant, usize)>,
    size: usize,
}

impl PopulationSnapshot {
    /// A population where a single variant holds every individual.
    pub fn monomorphic(variant: Variant, size: usize) -> Self {
        let entries = if size > 0 {
            vec![(variant, size)]
        } else {
            Vec::new()
        };
        Self { entries, size }
    }

    /// Build a snapshot from arbitrary `(variant, count)` pairs.
    ///
    /// Pairs are sorted, duplicate variants are merged and zero counts dropped.
    pub fn from_counts(pairs: impl IntoIterator<Item = (Variant, usize)>) -> Self {
        let mut pairs: Vec<(Variant, usize)> = pairs.into_iter().collect();
        pairs.sort_unstable_by_key(|&(v, _)| v);

        let mut entries: Vec<(Variant, usize)> = Vec::with_capacity(pairs.len());
        for (variant, count) in pairs {
            match entries.last_mut() {
                Some((last, total)) if *last == variant => *total += count,
                _ => entries.push((variant, count)),
            }
        }
        entries.retain(|&(_, count)| count > 0);

        let size = entries.iter().map(|&(_, c)| c).sum();
        Self { entries, size }
    }

    /// Assemble the next generation from per-variant copy tallies and the
    /// innovations minted during the step.
    ///
    /// `tallies[i]` counts the copies of `previous.entries[i]`.
    pub(crate) fn from_tallies(
        previous: &PopulationSnapshot,
        tallies: &[usize],
        innovations: Vec<Variant>,
    ) -> Self {
        debug_assert_eq!(tallies.len(), previous.entries.len());

        let mut entries = Vec::with_capacity(previous.entries.len() + innovations.len());
        entries.extend(
            previous
                .entries
                .iter()
                .zip(tallies)
                .filter(|(_, &copies)| copies > 0)
                .map(|(&(variant, _), &copies)| (variant, copies)),
        );
        entries.extend(innovations.into_iter().map(|v| (v, 1)));

        let size = entries.iter().map(|&(_, c)| c).sum();
        Self { entries, size }
    }

    /// Total number of individuals (the population size N).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct variants present.
    pub fn richness(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(variant, count)` pairs in identifier order.
    pub fn entries(&self) -> &[(Variant, usize)] {
        &self.entries
    }

    /// Iterate over the variants present.
    pub fn variants(&self) -> impl Iterator<Item = Variant> + '_ {
        self.entries.iter().map(|&(v, _)| v)
    }

    /// Counts in identifier order.
    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|&(_, c)| c).collect()
    }

    /// Count held by `variant` (0 when absent).
    pub fn count(&self, variant: Variant) -> usize {
        self.entries
            .binary_search_by_key(&variant, |&(v, _)| v)
            .map(|i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Proportions in identifier order.
    pub fn proportions(&self) -> Vec<f64> {
        let n = self.size as f64;
        self.entries.iter().map(|&(_, c)| c as f64 / n).collect()
    }

    /// True when a single variant holds the whole population.
    pub fn is_monomorphic(&self) -> bool {
        self.entries.len() == 1
    }

    /// Entries ranked by count, most common first.
    ///
    /// Ties go to the older variant (lower identifier).
    pub fn ranked(&self) -> Vec<(Variant, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Simpson diversity `1 - Σ p_i²` of this snapshot.
    pub fn simpson_diversity(&self) -> f64 {
        let counts: Vec<usize> = self.counts();
        simpson_index(&counts)
    }
}
