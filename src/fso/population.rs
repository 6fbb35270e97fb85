//! Swarm population state.
//!
//! The population is a 3-D key tensor indexed by
//! `(male agent, item, female agent)`: for each male, an `N x F` block whose
//! columns are the female candidate priority vectors. Each male also tracks
//! the column index of its current best female.

use ndarray::{s, Array2, Array3, ArrayView1, ArrayView2};

use crate::fitness::UNSCORED;

/// Priority-vector tensor plus per-male best bookkeeping.
#[derive(Debug, Clone)]
pub struct Population {
    keys: Array3<f64>,
    best: Vec<usize>,
}

impl Population {
    /// Creates a zero-filled population of `males x items x females`.
    pub fn new(males: usize, items: usize, females: usize) -> Self {
        Self {
            keys: Array3::zeros((males, items, females)),
            best: vec![0; males],
        }
    }

    /// Number of male agents (M).
    #[inline]
    pub fn male_count(&self) -> usize {
        self.keys.dim().0
    }

    /// Keys per vector (N).
    #[inline]
    pub fn item_count(&self) -> usize {
        self.keys.dim().1
    }

    /// Female vectors per male (F).
    #[inline]
    pub fn female_count(&self) -> usize {
        self.keys.dim().2
    }

    /// Female `female` of male `male`.
    pub fn female(&self, male: usize, female: usize) -> ArrayView1<'_, f64> {
        self.keys.slice(s![male, .., female])
    }

    /// Overwrites one female vector.
    ///
    /// # Panics
    /// If `keys.len()` differs from the item count.
    pub fn set_female(&mut self, male: usize, female: usize, keys: &[f64]) {
        self.keys
            .slice_mut(s![male, .., female])
            .assign(&ArrayView1::from(keys));
    }

    /// The `N x F` block of male `male`.
    pub fn block(&self, male: usize) -> ArrayView2<'_, f64> {
        self.keys.slice(s![male, .., ..])
    }

    /// Replaces the whole `N x F` block of male `male`.
    ///
    /// # Panics
    /// If `block` is not `N x F`.
    pub fn set_block(&mut self, male: usize, block: &Array2<f64>) {
        self.keys.slice_mut(s![male, .., ..]).assign(block);
    }

    /// Column index of male `male`'s best female.
    #[inline]
    pub fn best_index(&self, male: usize) -> usize {
        self.best[male]
    }

    /// Sets the best female index of male `male`.
    #[inline]
    pub fn set_best_index(&mut self, male: usize, female: usize) {
        self.best[male] = female;
    }

    /// Copy of male `male`'s best vector.
    pub fn best_keys(&self, male: usize) -> Vec<f64> {
        self.female(male, self.best[male]).to_vec()
    }

    /// Overwrites male `male`'s best vector in place, leaving the other
    /// females untouched.
    pub fn set_best_keys(&mut self, male: usize, keys: &[f64]) {
        let female = self.best[male];
        self.set_female(male, female, keys);
    }
}

/// Best solution seen across the whole run.
///
/// `keys` is in regrouped (bin-order) form, as returned by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest {
    /// Lowest score seen.
    pub score: f64,
    /// Priority vector that produced `score`.
    pub keys: Vec<f64>,
}

impl Default for GlobalBest {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalBest {
    /// Creates an empty record that any scored candidate improves.
    pub fn new() -> Self {
        Self {
            score: UNSCORED,
            keys: Vec::new(),
        }
    }

    /// Whether a candidate has been recorded.
    pub fn is_set(&self) -> bool {
        self.score.is_finite()
    }

    /// Replaces the record if `score` is strictly lower.
    ///
    /// Returns `true` if the record changed. Scores never increase.
    pub fn offer(&mut self, score: f64, keys: &[f64]) -> bool {
        if score < self.score {
            self.score = score;
            self.keys = keys.to_vec();
            true
        } else {
            false
        }
    }
}
