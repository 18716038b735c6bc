//! Frequency history of a run.
//!
//! Rows are generations in order; each row is the snapshot of that
//! generation. Columns are variants in identifier order, which is the order
//! of their first appearance in the run. Rows are stored sparsely since most
//! variants are present in only a few generations.

use crate::base::{PopulationSnapshot, Variant};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

/// Ordered sequence of snapshots, one per recorded generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyMatrix {
    /// Generation number of the first row
    first_generation: usize,
    rows: Vec<PopulationSnapshot>,
}

impl FrequencyMatrix {
    /// Empty matrix whose first row will be `first_generation`.
    pub fn new(first_generation: usize) -> Self {
        Self {
            first_generation,
            rows: Vec::new(),
        }
    }

    /// Build a matrix from consecutive snapshots.
    pub fn from_rows(first_generation: usize, rows: Vec<PopulationSnapshot>) -> Self {
        Self {
            first_generation,
            rows,
        }
    }

    /// Append the next generation.
    pub fn push(&mut self, snapshot: PopulationSnapshot) {
        self.rows.push(snapshot);
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Generation numbers covered by the rows.
    pub fn generations(&self) -> Range<usize> {
        self.first_generation..self.first_generation + self.rows.len()
    }

    pub fn first_generation(&self) -> usize {
        self.first_generation
    }

    /// Snapshot of row `index` (0-based, not the generation number).
    pub fn row(&self, index: usize) -> Option<&PopulationSnapshot> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[PopulationSnapshot] {
        &self.rows
    }

    /// Every variant present in at least one row, in column order.
    pub fn variants(&self) -> Vec<Variant> {
        let set: BTreeSet<Variant> = self.rows.iter().flat_map(|row| row.variants()).collect();
        set.into_iter().collect()
    }

    /// Dense count matrix: `(columns, rows)` where `rows[t][j]` is the count
    /// of `columns[j]` in row `t`.
    pub fn dense_counts(&self) -> (Vec<Variant>, Vec<Vec<usize>>) {
        let columns = self.variants();
        let index: BTreeMap<Variant, usize> =
            columns.iter().enumerate().map(|(j, &v)| (v, j)).collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut dense = vec![0; columns.len()];
                for &(variant, count) in row.entries() {
                    dense[index[&variant]] = count;
                }
                dense
            })
            .collect();

        (columns, rows)
    }

    /// Dense matrix of proportions, same layout as [`Self::dense_counts`].
    pub fn proportions(&self) -> (Vec<Variant>, Vec<Vec<f64>>) {
        let (columns, counts) = self.dense_counts();
        let rows = counts
            .into_iter()
            .zip(&self.rows)
            .map(|(dense, row)| {
                let n = row.size() as f64;
                dense.into_iter().map(|c| c as f64 / n).collect()
            })
            .collect();
        (columns, rows)
    }

    /// Sum of each variant's counts over all rows, in column order.
    pub fn column_totals(&self) -> Vec<(Variant, usize)> {
        let mut totals: BTreeMap<Variant, usize> = BTreeMap::new();
        for row in &self.rows {
            for &(variant, count) in row.entries() {
                *totals.entry(variant).or_insert(0) += count;
            }
        }
        totals.into_iter().collect()
    }

    /// The `k` variants with the largest total frequency over the matrix,
    /// most frequent first. Ties go to the older variant.
    pub fn top_variants(&self, k: usize) -> Vec<Variant> {
        let mut totals = self.column_totals();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        totals.into_iter().take(k).map(|(v, _)| v).collect()
    }

    /// Sub-matrix of rows `range` (0-based row indices, clamped to the matrix).
    pub fn window(&self, range: Range<usize>) -> FrequencyMatrix {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        Self {
            first_generation: self.first_generation + start,
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// The trailing `len` rows.
    pub fn tail(&self, len: usize) -> FrequencyMatrix {
        let start = self.rows.len().saturating_sub(len);
        self.window(start..self.rows.len())
    }

    /// Per-row Simpson diversity.
    pub fn diversity(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.simpson_diversity()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: u64) -> Variant {
        Variant::new(id)
    }

    fn matrix() -> FrequencyMatrix {
        FrequencyMatrix::from_rows(
            11,
            vec![
                PopulationSnapshot::from_counts(vec![(v(0), 3), (v(1), 1)]),
                PopulationSnapshot::from_counts(vec![(v(0), 2), (v(2), 2)]),
                PopulationSnapshot::from_counts(vec![(v(2), 4)]),
            ],
        )
    }

    #[test]
    fn test_generations() {
        let m = matrix();
        assert_eq!(m.len(), 3);
        assert_eq!(m.generations(), 11..14);
    }

    #[test]
    fn test_dense_counts_and_row_sums() {
        let (columns, rows) = matrix().dense_counts();
        assert_eq!(columns, vec![v(0), v(1), v(2)]);
        assert_eq!(rows, vec![vec![3, 1, 0], vec![2, 0, 2], vec![0, 0, 4]]);
        assert!(rows.iter().all(|r| r.iter().sum::<usize>() == 4));
    }

    #[test]
    fn test_proportions() {
        let (_, rows) = matrix().proportions();
        assert_eq!(rows[1], vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_column_totals_and_top() {
        let m = matrix();
        assert_eq!(m.column_totals(), vec![(v(0), 5), (v(1), 1), (v(2), 6)]);
        assert_eq!(m.top_variants(2), vec![v(2), v(0)]);
        assert_eq!(m.top_variants(10).len(), 3);
    }

    #[test]
    fn test_window_and_tail() {
        let m = matrix();
        let w = m.window(1..3);
        assert_eq!(w.generations(), 12..14);
        assert_eq!(w.variants(), vec![v(0), v(2)]);

        let t = m.tail(5);
        assert_eq!(t, m);
        assert!(m.window(7..9).is_empty());
    }

    #[test]
    fn test_diversity_per_row() {
        let d = matrix().diversity();
        assert!((d[0] - 0.375).abs() < 1e-12);
        assert!((d[1] - 0.5).abs() < 1e-12);
        assert_eq!(d[2], 0.0);
    }
}
