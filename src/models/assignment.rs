//! Bin assignment (decoded solution) model.
//!
//! Produced by decoding a priority vector. Besides the bins themselves it
//! carries the *regrouped* key vector: the priority values reordered to
//! follow placement order (all keys of bin 0, then bin 1, ...). The swarm
//! search moves agents in this representation, so it is not index-aligned
//! with the instance's item sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fitness::UNSCORED;

/// A complete packing of an instance's items into bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinAssignment {
    /// Item weights per bin, in placement order.
    pub bins: Vec<Vec<u64>>,
    /// Remaining free capacity per bin (parallel to `bins`).
    pub free_capacities: Vec<u64>,
    /// Priority keys regrouped into bin order.
    pub keys: Vec<f64>,
    /// Packing score (lower = better). [`UNSCORED`] until evaluated.
    pub score: f64,
}

impl BinAssignment {
    /// Creates an unscored assignment.
    pub fn new(bins: Vec<Vec<u64>>, free_capacities: Vec<u64>, keys: Vec<f64>) -> Self {
        Self {
            bins,
            free_capacities,
            keys,
            score: UNSCORED,
        }
    }

    /// Number of bins opened.
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Number of items placed across all bins.
    pub fn item_count(&self) -> usize {
        self.bins.iter().map(Vec::len).sum()
    }

    /// Whether a score has been assigned.
    #[inline]
    pub fn is_scored(&self) -> bool {
        self.score.is_finite()
    }

    /// Total weight loaded into bin `index`.
    pub fn load(&self, index: usize) -> u64 {
        self.bins.get(index).map_or(0, |b| b.iter().sum())
    }

    /// Sum of free capacity over all bins.
    pub fn total_free(&self) -> u64 {
        self.free_capacities.iter().sum()
    }

    /// Fill ratio `(capacity - free) / capacity` per bin.
    pub fn fill_ratios(&self, capacity: u64) -> Vec<f64> {
        if capacity == 0 {
            return vec![0.0; self.free_capacities.len()];
        }
        let cap = capacity as f64;
        self.free_capacities
            .iter()
            .map(|&free| (cap - free as f64) / cap)
            .collect()
    }

    /// Checks the packing invariants against an item sequence:
    /// every bin fits, free capacities match loads, and the bins hold
    /// exactly the instance's items (as a multiset).
    pub fn is_feasible(&self, capacity: u64, items: &[u64]) -> bool {
        if self.bins.len() != self.free_capacities.len() || self.keys.len() != items.len() {
            return false;
        }
        for (idx, &free) in self.free_capacities.iter().enumerate() {
            let load = self.load(idx);
            if load > capacity || capacity - load != free {
                return false;
            }
        }
        let mut placed: Vec<u64> = self.bins.iter().flatten().copied().collect();
        let mut expected = items.to_vec();
        placed.sort_unstable();
        expected.sort_unstable();
        placed == expected
    }
}

impl fmt::Display for BinAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinAssignment (Score = {}, Bins = {})",
            self.score,
            self.bin_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinAssignment {
        BinAssignment::new(
            vec![vec![6, 4], vec![9]],
            vec![0, 1],
            vec![0.5, 0.75, 0.25],
        )
    }

    #[test]
    fn test_new_is_unscored() {
        let a = sample();
        assert!(!a.is_scored());
        assert_eq!(a.bin_count(), 2);
        assert_eq!(a.item_count(), 3);
        assert_eq!(a.load(0), 10);
        assert_eq!(a.load(5), 0);
        assert_eq!(a.total_free(), 1);
    }

    #[test]
    fn test_fill_ratios() {
        let a = sample();
        let ratios = a.fill_ratios(10);
        assert_eq!(ratios, vec![1.0, 0.9]);
    }

    #[test]
    fn test_feasibility_check() {
        let a = sample();
        assert!(a.is_feasible(10, &[9, 6, 4]));
        // Missing item
        assert!(!a.is_feasible(10, &[9, 6, 4, 1]));
        // Over capacity
        assert!(!a.is_feasible(9, &[9, 6, 4]));
    }

    #[test]
    fn test_display() {
        let mut a = sample();
        a.score = 0.5;
        assert_eq!(a.to_string(), "BinAssignment (Score = 0.5, Bins = 2)");
    }
}
